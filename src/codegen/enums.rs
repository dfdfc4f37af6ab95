use super::naming::IdentifierNormalizer;

/// Go enum generated for an `enum(...)` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDefinition {
    /// Table the column belongs to; suffixed onto every member.
    pub scope_key: String,
    pub type_name: String,
    /// Member identifiers in declaration order.
    pub members: Vec<String>,
}

/// Builds the enum definition for `column_name` from its declared type, e.g.
/// `enum('NEW','DONE')` in table `jobs` yields members `NEW_jobs`, `DONE_jobs`.
///
/// The literal list is split best-effort; malformed or empty lists are not
/// rejected.
pub fn extract(
    normalizer: &IdentifierNormalizer,
    column_name: &str,
    raw_enum_type: &str,
    scope_key: &str,
) -> EnumDefinition {
    let trimmed = raw_enum_type.trim();
    let body = strip_prefix_ignore_case(trimmed, "enum(").unwrap_or(trimmed);
    let body = body.strip_suffix(')').unwrap_or(body);
    let body = body.replace('\'', "");

    let members = body
        .split(',')
        .map(|literal| format!("{literal}_{scope_key}"))
        .collect();

    EnumDefinition {
        scope_key: scope_key.to_string(),
        type_name: normalizer.normalize(column_name),
        members,
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &value[prefix.len()..])
}
