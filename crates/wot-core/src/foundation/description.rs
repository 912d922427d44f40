//! Thing Description data model.
//!
//! A [`ThingDescription`] is the interaction catalog of a Thing: its name, an
//! optional `base` address and a list of [`Interaction`]s, each reachable
//! through one or more [`Link`]s. The serde representation follows the
//! thingweb JSON-LD layout:
//!
//! ```json
//! {
//!   "@context": ["http://w3c.github.io/wot/w3c-wot-td-context.jsonld"],
//!   "@type": "Thing",
//!   "name": "MyCounter",
//!   "base": "http://192.168.0.10/counter/",
//!   "interactions": [
//!     {
//!       "@type": ["Property"],
//!       "name": "count",
//!       "outputData": { "type": "integer" },
//!       "writable": true,
//!       "links": [
//!         { "href": "count", "mediaType": "application/json" },
//!         { "href": "coap://192.168.0.10/counter/count", "mediaType": "application/json" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Members this model does not name are kept in `extra` maps so a parsed
//! description serializes back without loss.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::foundation::error::{DescriptionError, DescriptionResult};

/// Kind of an interaction. Each kind is a separate name space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionType {
    /// A readable (and possibly writable) value.
    Property,
    /// An invocable function.
    Action,
    /// A notification source.
    Event,
}

impl InteractionType {
    /// The `@type` keyword that marks this kind in a description.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Property => "Property",
            Self::Action => "Action",
            Self::Event => "Event",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Property" => Some(Self::Property),
            "Action" => Some(Self::Action),
            "Event" => Some(Self::Event),
            _ => None,
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property => write!(f, "property"),
            Self::Action => write!(f, "action"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// Returns the lower-cased scheme of an absolute address.
///
/// Relative or malformed addresses have no scheme.
pub fn extract_scheme(href: &str) -> Option<String> {
    Url::parse(href).ok().map(|url| url.scheme().to_string())
}

// =============================================================================
// Link
// =============================================================================

/// One transport-specific way to reach an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute address, or one relative to the description's `base`.
    pub href: String,
    /// Media type served at `href`.
    #[serde(rename = "mediaType", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Members not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    /// Creates a link without a media type.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            media_type: None,
            extra: Map::new(),
        }
    }

    /// Sets the media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Scheme implied by the href, if it is absolute.
    pub fn scheme(&self) -> Option<String> {
        extract_scheme(&self.href)
    }
}

// =============================================================================
// Interaction
// =============================================================================

/// A named property, action or event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInteraction", into = "RawInteraction")]
pub struct Interaction {
    /// Name, unique within its kind.
    pub name: String,
    /// Kind of interaction.
    pub interaction_type: InteractionType,
    /// Additional semantic `@type` annotations.
    pub semantic_types: Vec<String>,
    /// Candidate links, most preferred first.
    pub links: Vec<Link>,
    /// Members not modelled here (`outputData`, `writable`, ...).
    pub extra: Map<String, Value>,
}

impl Interaction {
    /// Creates an interaction with no links.
    pub fn new(name: impl Into<String>, interaction_type: InteractionType) -> Self {
        Self {
            name: name.into(),
            interaction_type,
            semantic_types: Vec::new(),
            links: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Creates a property.
    pub fn property(name: impl Into<String>) -> Self {
        Self::new(name, InteractionType::Property)
    }

    /// Creates an action.
    pub fn action(name: impl Into<String>) -> Self {
        Self::new(name, InteractionType::Action)
    }

    /// Creates an event.
    pub fn event(name: impl Into<String>) -> Self {
        Self::new(name, InteractionType::Event)
    }

    /// Appends a link with the given href.
    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.links.push(Link::new(href));
        self
    }

    /// Sets an extra member such as `writable` or `outputData`.
    pub fn with_member(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether the description marks this property writable.
    pub fn is_writable(&self) -> bool {
        self.extra
            .get("writable")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[derive(Serialize, Deserialize)]
struct RawInteraction {
    #[serde(rename = "@type", deserialize_with = "one_or_many", default)]
    types: Vec<String>,
    name: String,
    #[serde(default)]
    links: Vec<Link>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawInteraction> for Interaction {
    type Error = String;

    fn try_from(raw: RawInteraction) -> Result<Self, Self::Error> {
        let mut interaction_type = None;
        let mut semantic_types = Vec::new();
        for ty in raw.types {
            match InteractionType::from_keyword(&ty) {
                Some(kind) if interaction_type.is_none() => interaction_type = Some(kind),
                _ => semantic_types.push(ty),
            }
        }
        let interaction_type = interaction_type.ok_or_else(|| {
            format!(
                "interaction '{}' is not typed as Property, Action or Event",
                raw.name
            )
        })?;

        Ok(Self {
            name: raw.name,
            interaction_type,
            semantic_types,
            links: raw.links,
            extra: raw.extra,
        })
    }
}

impl From<Interaction> for RawInteraction {
    fn from(interaction: Interaction) -> Self {
        let mut types = Vec::with_capacity(interaction.semantic_types.len() + 1);
        types.push(interaction.interaction_type.keyword().to_string());
        types.extend(interaction.semantic_types);
        Self {
            types,
            name: interaction.name,
            links: interaction.links,
            extra: interaction.extra,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(one) => vec![one],
        OneOrMany::Many(many) => many,
    })
}

// =============================================================================
// Thing Description
// =============================================================================

/// Parsed interaction catalog of a Thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThingDescription {
    /// JSON-LD context.
    #[serde(rename = "@context", default, skip_serializing_if = "Value::is_null")]
    pub context: Value,
    /// Semantic type of the Thing.
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub thing_type: Option<Value>,
    /// Thing name.
    pub name: String,
    /// Address that relative link hrefs are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Interactions in catalog order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Members not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ThingDescription {
    /// Creates an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            context: Value::Null,
            thing_type: None,
            name: name.into(),
            base: None,
            interactions: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sets the base address.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Appends an interaction.
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    /// Parses a description from JSON text.
    pub fn from_json_str(text: &str) -> DescriptionResult<Self> {
        serde_json::from_str(text).map_err(|e| DescriptionError::Parse(e.to_string()))
    }

    /// Parses a description from a JSON bytes payload.
    pub fn from_json_slice(bytes: &[u8]) -> DescriptionResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| DescriptionError::Parse(e.to_string()))
    }

    /// Parses a description from its object form.
    pub fn from_value(value: Value) -> DescriptionResult<Self> {
        serde_json::from_value(value).map_err(|e| DescriptionError::Parse(e.to_string()))
    }

    /// Serializes the description to its object form.
    pub fn to_value(&self) -> DescriptionResult<Value> {
        serde_json::to_value(self).map_err(|e| DescriptionError::Serialize(e.to_string()))
    }

    /// Returns the first interaction of `kind` named `name`, in catalog order.
    pub fn find_interaction(&self, name: &str, kind: InteractionType) -> Option<&Interaction> {
        self.interactions
            .iter()
            .find(|ia| ia.interaction_type == kind && ia.name == name)
    }

    /// Iterates over interactions of one kind.
    pub fn interactions_of(&self, kind: InteractionType) -> impl Iterator<Item = &Interaction> {
        self.interactions
            .iter()
            .filter(move |ia| ia.interaction_type == kind)
    }

    /// Resolves `href` against `base` when it is relative.
    ///
    /// Absolute hrefs, and relative ones without a usable base, are returned as is.
    pub fn resolve_href(&self, href: &str) -> String {
        if Url::parse(href).is_ok() {
            return href.to_string();
        }
        self.base
            .as_deref()
            .and_then(|base| Url::parse(base).ok())
            .and_then(|base| base.join(href).ok())
            .map(String::from)
            .unwrap_or_else(|| href.to_string())
    }

    /// Links of `interaction` with every href made absolute.
    pub fn resolved_links(&self, interaction: &Interaction) -> Vec<Link> {
        interaction
            .links
            .iter()
            .map(|link| Link {
                href: self.resolve_href(&link.href),
                ..link.clone()
            })
            .collect()
    }
}
