use crate::model::leave_request::Classification;

/// Checked top to bottom; the first rule with a matching keyword wins.
const RULES: &[(&[&str], Classification)] = &[
    (
        &["expense", "reimbursement", "travel cost"],
        Classification::Expense,
    ),
    (
        &["transfer", "department", "role change"],
        Classification::Transfer,
    ),
];

/// Derive the category of a request from its free-text reason.
pub fn classify(reason: &str) -> Classification {
    let reason = reason.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| reason.contains(*k)))
        .map(|(_, class)| *class)
        .unwrap_or(Classification::Leave)
}
