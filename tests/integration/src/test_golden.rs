//! Cross-implementation reference vectors.

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use macauth::{HeaderBuilder, authenticate, compute_mac};

    use crate::{TEST_ID, resolver, test_credential, test_uri};

    const GOLDEN_SHA256: &str = "QQY82LpBxhLw04rx7pVotsLN2LEvLDEdCr5FAbZLLmM=";
    const GOLDEN_SHA1: &str = "FmHilvbsepALFa3GXr3eeUq+smE=";

    fn golden_mac(algorithm: &str) -> String {
        compute_mac(
            "example.com",
            "GET",
            "/resource?a=1&b=2",
            8000,
            Some("some-app-data"),
            "1353832234",
            &test_credential(algorithm),
        )
        .unwrap()
    }

    #[test]
    fn test_should_match_sha256_reference_vector() {
        assert_eq!(golden_mac("HMACSHA256"), GOLDEN_SHA256);
    }

    #[test]
    fn test_should_match_sha1_reference_vector() {
        assert_eq!(golden_mac("HMACSHA1"), GOLDEN_SHA1);
        assert_eq!(golden_mac("hmacsha1"), GOLDEN_SHA1);
    }

    #[test]
    fn test_should_verify_reference_header_written_by_hand() {
        let header = format!(
            r#"id="{TEST_ID}", ts="1353832234", mac="{GOLDEN_SHA256}", ext="some-app-data""#
        );
        let identity = authenticate(
            &header,
            "example.com",
            "GET",
            &test_uri(),
            &resolver([test_credential("HMACSHA256")]),
        )
        .unwrap();
        assert_eq!(identity.principal_name, "Steve");
    }

    #[test]
    fn test_should_build_reference_header() {
        let uri = test_uri();
        let header = HeaderBuilder::new("example.com", "GET", &uri)
            .ext("some-app-data")
            .timestamp(DateTime::from_timestamp(1_353_832_234, 0).unwrap())
            .build(&test_credential("HMACSHA256"))
            .unwrap();
        assert!(header.contains(&format!(r#"mac="{GOLDEN_SHA256}""#)));
    }
}
