/// A product name in `User-Agent` headers.
pub const PRODUCT_NAME: &str = "Selfoss";
/// A project URL appended to `User-Agent` headers.
pub const PROJECT_URL: &str = "https://selfoss.aditu.de";

/// Builds a `User-Agent` header value.
///
/// Extra information tokens are listed in order before the project URL.
pub fn user_agent(version: &str, agent_info: Option<&[&str]>) -> String {
    let mut tokens = agent_info
        .unwrap_or_default()
        .iter()
        .map(|token| (*token).to_owned())
        .collect::<Vec<_>>();
    tokens.push(format!("+{PROJECT_URL}"));

    format!("{PRODUCT_NAME}/{version} ({})", tokens.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_without_info() {
        assert_eq!(
            user_agent("2.19", None),
            "Selfoss/2.19 (+https://selfoss.aditu.de)"
        );
    }

    #[test]
    fn build_with_empty_info() {
        let info: &[&str] = &[];

        assert_eq!(user_agent("2.19", Some(info)), user_agent("2.19", None));
    }

    #[test]
    fn build_with_info() {
        assert_eq!(
            user_agent("2.19", Some(&["foo", "bar"][..])),
            "Selfoss/2.19 (foo; bar; +https://selfoss.aditu.de)"
        );
    }
}
