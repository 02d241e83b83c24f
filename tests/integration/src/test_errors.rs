//! Every failure kind surfaces as its own error.

#[cfg(test)]
mod tests {
    use macauth::credentials::BoxError;
    use macauth::{AuthError, Credential, authenticate, build_header};

    use crate::{TEST_ID, TEST_KEY, resolver, test_credential, test_uri};

    fn signed_header() -> String {
        build_header(
            "example.com",
            "GET",
            &test_uri(),
            &test_credential("HMACSHA256"),
            Some("some-app-data"),
            None,
        )
        .unwrap()
    }

    fn verify_with(
        header: &str,
        resolver: &dyn macauth::CredentialResolver,
    ) -> Result<macauth::VerifiedIdentity, AuthError> {
        authenticate(header, "example.com", "GET", &test_uri(), resolver)
    }

    fn remove_attribute(header: &str, name: &str) -> String {
        header
            .split(", ")
            .filter(|pair| !pair.starts_with(&format!("{name}=")))
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[test]
    fn test_should_report_each_missing_attribute() {
        let resolver = resolver([test_credential("HMACSHA256")]);
        for name in ["id", "ts", "mac"] {
            let header = remove_attribute(&signed_header(), name);
            assert_eq!(
                verify_with(&header, &resolver),
                Err(AuthError::MissingAttributes(name.to_owned())),
                "without {name}"
            );
        }
    }

    #[test]
    fn test_should_report_unknown_attributes() {
        let resolver = resolver([test_credential("HMACSHA256")]);
        let header = format!(r#"{}, nonce="Ygvqdz", hash="abc""#, signed_header());
        assert_eq!(
            verify_with(&header, &resolver),
            Err(AuthError::UnknownAttributes("nonce, hash".to_owned()))
        );
    }

    #[test]
    fn test_should_report_bad_mac_for_each_flipped_character() {
        let resolver = resolver([test_credential("HMACSHA256")]);
        let header = signed_header();
        let attrs = macauth::attributes::parse_attributes(&header).unwrap();
        let mac = attrs.get("mac").unwrap().to_owned();

        for (i, ch) in mac.char_indices() {
            let flipped = if ch == 'A' { 'B' } else { 'A' };
            let mut tampered = mac.clone();
            tampered.replace_range(i..=i, &flipped.to_string());
            let header = header.replace(&mac, &tampered);
            assert_eq!(verify_with(&header, &resolver), Err(AuthError::BadMac));
        }
    }

    #[test]
    fn test_should_report_bad_mac_for_truncated_mac() {
        let resolver = resolver([test_credential("HMACSHA256")]);
        let header = signed_header();
        let attrs = macauth::attributes::parse_attributes(&header).unwrap();
        let mac = attrs.get("mac").unwrap().to_owned();

        let header = header.replace(&mac, &mac[..mac.len() - 1]);
        assert_eq!(verify_with(&header, &resolver), Err(AuthError::BadMac));
    }

    #[test]
    fn test_should_report_unknown_principal_for_absent_and_failing_lookups() {
        let header = signed_header();

        assert_eq!(
            verify_with(&header, &resolver([])),
            Err(AuthError::UnknownPrincipal(TEST_ID.to_owned()))
        );

        let failing =
            |_: &str| -> Result<Option<Credential>, BoxError> { Err("database is down".into()) };
        assert_eq!(
            verify_with(&header, &failing),
            Err(AuthError::UnknownPrincipal(TEST_ID.to_owned()))
        );
    }

    #[test]
    fn test_should_report_invalid_and_unsupported_credentials() {
        let header = signed_header();

        let keyless = Credential::new(TEST_ID, "", "HMACSHA256");
        assert_eq!(
            verify_with(&header, &resolver([keyless])),
            Err(AuthError::InvalidCredential(TEST_ID.to_owned()))
        );

        let md5 = Credential::new(TEST_ID, TEST_KEY, "HMACMD5");
        assert_eq!(
            verify_with(&header, &resolver([md5])),
            Err(AuthError::UnsupportedAlgorithm("HMACMD5".to_owned()))
        );
    }
}
