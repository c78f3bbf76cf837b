//! Predicate URIs understood by the statement classifier.

pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const ADMS: &str = "http://www.w3.org/ns/adms#";
pub const GTS: &str = "http://resource.geosciml.org/ontology/timescale/gts#";

pub const SKOS_IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const SKOS_DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
pub const SKOS_BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
pub const SKOS_NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";
pub const SKOS_TOP_CONCEPT_OF: &str = "http://www.w3.org/2004/02/skos/core#topConceptOf";
pub const RDFS_IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
pub const ADMS_STATUS: &str = "http://www.w3.org/ns/adms#status";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const GTS_RANK: &str = "http://resource.geosciml.org/ontology/timescale/gts#rank";

/// Closed mapping from predicate URI to its effect on a term record.
///
/// Every URI maps to exactly one variant; anything not listed is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    InScheme,
    PrefLabel,
    Definition,
    Broader,
    Narrower,
    IsDefinedBy,
    Status,
    /// `rdf:type`, `skos:topConceptOf` and `gts:rank` carry no display data.
    Ignored,
    Other(&'a str),
}

impl<'a> Predicate<'a> {
    pub fn from_uri(uri: &'a str) -> Self {
        match uri.trim() {
            SKOS_IN_SCHEME => Predicate::InScheme,
            SKOS_PREF_LABEL => Predicate::PrefLabel,
            SKOS_DEFINITION => Predicate::Definition,
            SKOS_BROADER => Predicate::Broader,
            SKOS_NARROWER => Predicate::Narrower,
            RDFS_IS_DEFINED_BY => Predicate::IsDefinedBy,
            ADMS_STATUS => Predicate::Status,
            RDF_TYPE | SKOS_TOP_CONCEPT_OF | GTS_RANK => Predicate::Ignored,
            _ => Predicate::Other(uri),
        }
    }
}
