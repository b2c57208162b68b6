use chrono::TimeZone;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CURRENCIES_BODY: &str =
        r#"{"data": {"USD": {"name": "US Dollar"}, "PKR": {"name": "Pakistani Rupee"}}}"#;

    /// Mock rate service with a fixed two-currency catalog and the given
    /// convert response.
    pub async fn mock_rate_service(convert_response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CURRENCIES_BODY))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/convert"))
            .respond_with(convert_response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    /// Config file pointing the provider at the mock and history at a temp
    /// dir.
    pub fn write_config(base_url: &str, data_path: &std::path::Path) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
providers:
  fxconvert:
    base_url: {base_url}
data_path: "{}"
"#,
            data_path.display()
        );
        std::fs::write(config_file.path(), &config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_persists_history() {
    let mock_server = test_utils::mock_rate_service(
        wiremock::ResponseTemplate::new(200).set_body_string(
            r#"{"result": 2790.0, "rate": 279.0, "fetchedAt": "2024-05-01T12:00:00Z"}"#,
        ),
    )
    .await;
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_utils::write_config(&mock_server.uri(), data_dir.path());

    let result = fxc::run_command(
        fxc::AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "PKR".to_string(),
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    // A fresh store observes the persisted entry.
    let store = fxc::store::HistoryStore::open(data_dir.path());
    let entries = store.entries();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.from, "USD");
    assert_eq!(entry.to, "PKR");
    assert_eq!(entry.amount, 10.0);
    assert_eq!(entry.result, 2790.0);
    assert_eq!(entry.rate, 279.0);
    assert_eq!(
        entry.at,
        chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
    assert!(!entry.id.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_failed_conversion_is_not_fatal_and_history_is_unchanged() {
    let mock_server =
        test_utils::mock_rate_service(wiremock::ResponseTemplate::new(500)).await;
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_utils::write_config(&mock_server.uri(), data_dir.path());

    let result = fxc::run_command(
        fxc::AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "PKR".to_string(),
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "A convert failure must not be fatal");

    let store = fxc::store::HistoryStore::open(data_dir.path());
    assert!(store.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_unknown_currency_issues_no_convert_request() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data": {"USD": {"name": "US Dollar"}, "PKR": {"name": "Pakistani Rupee"}}}"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/convert"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_utils::write_config(&mock_server.uri(), data_dir.path());

    let result = fxc::run_command(
        fxc::AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "XYZ".to_string(),
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());

    let store = fxc::store::HistoryStore::open(data_dir.path());
    assert!(store.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_invalid_amount_issues_no_convert_request() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data": {"USD": {"name": "US Dollar"}, "PKR": {"name": "Pakistani Rupee"}}}"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/convert"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_utils::write_config(&mock_server.uri(), data_dir.path());

    let result = fxc::run_command(
        fxc::AppCommand::Convert {
            amount: "ten".to_string(),
            from: "USD".to_string(),
            to: "PKR".to_string(),
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());

    let store = fxc::store::HistoryStore::open(data_dir.path());
    assert!(store.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_catalog_failure_degrades_but_does_not_block_conversion() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currencies"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/convert"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"result": 9.2, "rate": 0.92, "fetchedAt": "2024-05-01T12:00:00Z"}"#,
        ))
        .mount(&mock_server)
        .await;

    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_utils::write_config(&mock_server.uri(), data_dir.path());

    let result = fxc::run_command(
        fxc::AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());

    let store = fxc::store::HistoryStore::open(data_dir.path());
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].rate, 0.92);
}

#[test_log::test(tokio::test)]
async fn test_history_clear_flow_survives_reload() {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

    {
        let store = fxc::store::HistoryStore::open(data_dir.path());
        store.append(fxc::core::HistoryEntry {
            id: "seed".to_string(),
            from: "USD".to_string(),
            to: "PKR".to_string(),
            amount: 10.0,
            result: 2790.0,
            rate: 279.0,
            at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        });
        assert_eq!(store.len(), 1);
    }

    let mock_server = test_utils::mock_rate_service(wiremock::ResponseTemplate::new(200)).await;
    let config = test_utils::write_config(&mock_server.uri(), data_dir.path());

    let result = fxc::run_command(
        fxc::AppCommand::History { clear: true },
        Some(config.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());

    let reopened = fxc::store::HistoryStore::open(data_dir.path());
    assert!(reopened.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_currencies_command_lists_catalog() {
    let mock_server = test_utils::mock_rate_service(wiremock::ResponseTemplate::new(200)).await;
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_utils::write_config(&mock_server.uri(), data_dir.path());

    let result = fxc::run_command(
        fxc::AppCommand::Currencies,
        Some(config.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Currencies failed with: {:?}", result.err());
}
