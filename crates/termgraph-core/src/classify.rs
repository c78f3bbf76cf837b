//! Statement classification: flat term query rows to a [`TermRecord`].

use tracing::{debug, trace};

use crate::models::{Row, Statement, TermRecord};
use crate::vocab::Predicate;

/// Convert `?predicate ?object` rows to statements, keeping result order.
///
/// Rows without a predicate binding are skipped and logged at DEBUG.
pub fn statements_from_rows(rows: &[Row]) -> Vec<Statement> {
    rows.iter()
        .enumerate()
        .filter_map(|(position, row)| {
            let statement = Statement::from_row(row);
            if statement.is_none() {
                debug!(
                    position,
                    variables = ?row.keys().collect::<Vec<_>>(),
                    "Row without predicate skipped"
                );
            }
            statement
        })
        .collect()
}

/// Apply one statement to the record.
pub fn apply(record: &mut TermRecord, statement: &Statement) {
    let object = &statement.object;
    match Predicate::from_uri(&statement.predicate.value) {
        Predicate::InScheme => {
            record.uri = format!("{}/{}", object.value, record.term);
        }
        Predicate::PrefLabel => {
            if let Some(language) = object.language.as_deref().filter(|l| !l.is_empty()) {
                record.languages.insert(language, object.value.as_str());
            }
        }
        Predicate::Definition => record.definition = object.value.clone(),
        Predicate::Broader => record.related_terms.broader.push(object.value.clone()),
        Predicate::Narrower => record.related_terms.narrower.push(object.value.clone()),
        Predicate::IsDefinedBy => record.is_defined_by = object.value.clone(),
        Predicate::Status => record.term_status = object.value.clone(),
        Predicate::Ignored => {}
        Predicate::Other(predicate) => {
            trace!(predicate, value = %object.value, "Adding to other relations");
            record
                .related_terms
                .push_other(predicate, object.value.as_str());
        }
    }
}

/// Classify every statement into `record`, then order its labels by
/// `language_order`, dropping unlisted languages.
pub fn classify<S: AsRef<str>>(
    record: &mut TermRecord,
    statements: &[Statement],
    language_order: &[S],
) {
    for statement in statements {
        apply(record, statement);
    }
    record.languages = record.languages.ordered_by(language_order);
}
