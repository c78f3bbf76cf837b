//! Data model for resolved vocabulary terms.
//!
//! Field names serialize in camelCase because the presentation layer reads
//! them directly.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::defaults::BREADCRUMB_START_PAGE;

// =============================================================================
// RDF TERMS AND ROWS
// =============================================================================

/// Kind of RDF term in a query result binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TermType {
    NamedNode,
    BlankNode,
    #[default]
    Literal,
}

/// A single bound value in a query result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdfTerm {
    pub term_type: TermType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Datatype IRI; on the wire a named node `{"termType":"NamedNode","value":..}`.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "datatype_node")]
    pub datatype: Option<String>,
}

impl RdfTerm {
    pub fn iri(value: impl Into<String>) -> Self {
        Self {
            term_type: TermType::NamedNode,
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    pub fn blank(value: impl Into<String>) -> Self {
        Self {
            term_type: TermType::BlankNode,
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            term_type: TermType::Literal,
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::literal(value)
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            datatype: Some(datatype.into()),
            ..Self::literal(value)
        }
    }
}

mod datatype_node {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TermType;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct NamedNode<T> {
        term_type: TermType,
        value: T,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Node(NamedNode<String>),
        Iri(String),
    }

    pub fn serialize<S: Serializer>(
        datatype: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match datatype {
            Some(iri) => NamedNode {
                term_type: TermType::NamedNode,
                value: iri.as_str(),
            }
            .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
            Repr::Node(node) => node.value,
            Repr::Iri(iri) => iri,
        }))
    }
}

/// One solution of a SELECT query, keyed by variable name.
pub type Row = BTreeMap<String, RdfTerm>;

/// One predicate/object fact about the requested term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub predicate: RdfTerm,
    pub object: RdfTerm,
}

impl Statement {
    pub fn new(predicate: impl Into<String>, object: RdfTerm) -> Self {
        Self {
            predicate: RdfTerm::iri(predicate),
            object,
        }
    }

    /// Build a statement from a `?predicate ?object` row.
    ///
    /// Rows without a predicate are not statements. A missing object becomes
    /// an empty literal.
    pub fn from_row(row: &Row) -> Option<Self> {
        let predicate = row.get("predicate")?.clone();
        let object = row
            .get("object")
            .cloned()
            .unwrap_or_else(|| RdfTerm::literal(""));
        Some(Self { predicate, object })
    }
}

// =============================================================================
// LANGUAGE LABELS
// =============================================================================

/// Preferred labels keyed by language code, in a fixed iteration order.
///
/// Serializes as a JSON object whose keys appear in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageLabels(Vec<(String, String)>);

impl LanguageLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label for a language, replacing any previous value in place.
    pub fn insert(&mut self, language: impl Into<String>, label: impl Into<String>) {
        let language = language.into();
        let label = label.into();
        match self.0.iter_mut().find(|(lang, _)| *lang == language) {
            Some(entry) => entry.1 = label,
            None => self.0.push((language, label)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn languages(&self) -> Vec<&str> {
        self.0.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-order by a priority list. Languages absent from `order` are dropped.
    pub fn ordered_by<S: AsRef<str>>(&self, order: &[S]) -> Self {
        let mut ordered = Self::new();
        for language in order {
            let language = language.as_ref();
            if let Some(label) = self.get(language) {
                ordered.insert(language, label);
            }
        }
        ordered
    }
}

impl Serialize for LanguageLabels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (language, label) in &self.0 {
            map.serialize_entry(language, label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageLabels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LabelsVisitor;

        impl<'de> Visitor<'de> for LabelsVisitor {
            type Value = LanguageLabels;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language code to label")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut labels = LanguageLabels::new();
                while let Some((language, label)) = access.next_entry::<String, String>()? {
                    labels.insert(language, label);
                }
                Ok(labels)
            }
        }

        deserializer.deserialize_map(LabelsVisitor)
    }
}

// =============================================================================
// TERM RECORD
// =============================================================================

/// Values of one non-hierarchical predicate, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationGroup {
    pub predicate: String,
    pub values: Vec<String>,
}

/// Relations from the term to other resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTerms {
    pub broader: Vec<String>,
    pub narrower: Vec<String>,
    /// Grouped by predicate; groups ordered by first arrival.
    pub other_relation: Vec<RelationGroup>,
}

impl RelatedTerms {
    pub fn push_other(&mut self, predicate: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .other_relation
            .iter_mut()
            .find(|group| group.predicate == predicate)
        {
            Some(group) => group.values.push(value),
            None => self.other_relation.push(RelationGroup {
                predicate: predicate.to_string(),
                values: vec![value],
            }),
        }
    }

    pub fn other(&self, predicate: &str) -> Option<&[String]> {
        self.other_relation
            .iter()
            .find(|group| group.predicate == predicate)
            .map(|group| group.values.as_slice())
    }
}

/// Presentation-ready description of one vocabulary concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRecord {
    pub term: String,
    /// Empty until an `inScheme` statement is classified.
    pub uri: String,
    pub vocabulary: String,
    pub version: String,
    pub languages: LanguageLabels,
    pub definition: String,
    pub related_terms: RelatedTerms,
    pub is_defined_by: String,
    pub term_status: String,
}

impl TermRecord {
    pub fn new(
        term: impl Into<String>,
        vocabulary: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            uri: String::new(),
            vocabulary: vocabulary.into(),
            version: version.into(),
            languages: LanguageLabels::new(),
            definition: String::new(),
            related_terms: RelatedTerms::default(),
            is_defined_by: String::new(),
            term_status: String::new(),
        }
    }
}

// =============================================================================
// BREADCRUMBS
// =============================================================================

/// Ancestor chain of a term, as ordered by the breadcrumb query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbPath {
    pub start_page: String,
    pub vocabulary: String,
    pub broader: Vec<String>,
    pub term: String,
}

impl BreadcrumbPath {
    pub fn new(vocabulary: impl Into<String>, term: impl Into<String>, broader: Vec<String>) -> Self {
        Self {
            start_page: BREADCRUMB_START_PAGE.to_string(),
            vocabulary: vocabulary.into(),
            broader,
            term: term.into(),
        }
    }
}

// =============================================================================
// RESPONSE PAYLOADS
// =============================================================================

/// Full response for one term lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermPayload {
    /// Raw term query rows.
    pub predicates: Vec<Statement>,
    pub term_data: TermRecord,
    pub bread_crumbs_data: BreadcrumbPath,
    pub all_concept_map: BTreeMap<String, String>,
}

/// Response carrying only the cross-vocabulary label index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMapPayload {
    pub all_concept_map: BTreeMap<String, String>,
}
