//! Default file-as (display name) synthesis.

/// Builds a display name from name parts, falling back to the company.
///
/// The policy is fixed: `"Lastname, Firstname Middlename"` when a last
/// name is present, otherwise the given names, otherwise the company
/// name. Callers with their own display-name rules supply a different
/// builder to the encoder.
#[must_use]
pub fn build_file_as(lastname: &str, firstname: &str, middlename: &str, company: &str) -> String {
    let given = [firstname, middlename]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if !lastname.is_empty() {
        if given.is_empty() {
            return lastname.to_string();
        }
        return format!("{lastname}, {given}");
    }

    if !given.is_empty() {
        return given;
    }

    company.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name() {
        assert_eq!(
            build_file_as("Smith", "John", "Quincy", "Acme"),
            "Smith, John Quincy"
        );
    }

    #[test]
    fn last_name_only() {
        assert_eq!(build_file_as("Smith", "", "", ""), "Smith");
    }

    #[test]
    fn given_names_only() {
        assert_eq!(build_file_as("", "John", "", ""), "John");
    }

    #[test]
    fn falls_back_to_company() {
        assert_eq!(build_file_as("", "", "", "Acme"), "Acme");
    }

    #[test]
    fn everything_empty() {
        assert_eq!(build_file_as("", "", "", ""), "");
    }
}
