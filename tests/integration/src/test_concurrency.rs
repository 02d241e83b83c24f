//! Verification is stateless and safe to run concurrently.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use macauth::{AuthError, Credential, RequestUri, VerifiedIdentity, authenticate, build_header};

    use crate::{resolver, test_credential};

    #[tokio::test]
    async fn test_should_verify_concurrently_on_blocking_tasks() {
        let credentials: Vec<Credential> = (0..16)
            .map(|i| {
                let algorithm = if i % 2 == 0 { "HMACSHA256" } else { "HMACSHA1" };
                let mut credential = test_credential(algorithm);
                credential.id = format!("client-{i}");
                credential.key = format!("secret-{i}");
                credential.principal_name = Some(format!("principal-{i}"));
                credential
            })
            .collect();
        let resolver = Arc::new(resolver(credentials.clone()));

        let mut handles = Vec::new();
        for (i, credential) in credentials.into_iter().enumerate() {
            let resolver = Arc::clone(&resolver);
            handles.push(tokio::task::spawn_blocking(move || -> Result<VerifiedIdentity, AuthError> {
                let uri = RequestUri::new(format!("/items/{i}"), Some("page=1"), 8080);
                let header =
                    build_header("example.com", "GET", &uri, &credential, None, None)?;
                authenticate(&header, "example.com", "GET", &uri, resolver.as_ref())
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            let identity = handle.await.unwrap().unwrap();
            assert_eq!(identity.id, format!("client-{i}"));
            assert_eq!(identity.principal_name, format!("principal-{i}"));
        }
    }

    #[test]
    fn test_should_not_leak_state_between_threads() {
        let resolver = resolver([test_credential("HMACSHA256")]);
        let uri = crate::test_uri();

        std::thread::scope(|scope| {
            let good = scope.spawn(|| {
                (0..100)
                    .map(|_| -> Result<VerifiedIdentity, AuthError> {
                        let header = build_header(
                            "example.com",
                            "GET",
                            &uri,
                            &test_credential("HMACSHA256"),
                            None,
                            None,
                        )?;
                        authenticate(&header, "example.com", "GET", &uri, &resolver)
                    })
                    .flatten()
                    .count()
            });
            let bad = scope.spawn(|| {
                (0..100)
                    .map(|_| {
                        authenticate(
                            r#"id="dh37fgj492je", ts="1", mac="AAAA""#,
                            "example.com",
                            "GET",
                            &uri,
                            &resolver,
                        )
                    })
                    .filter(|result| *result == Err(AuthError::BadMac))
                    .count()
            });

            assert_eq!(good.join().unwrap(), 100);
            assert_eq!(bad.join().unwrap(), 100);
        });
    }
}
