mod common;

use pgprobe_app::connector::{CLOSED_NOTICE, CONNECTING_NOTICE, VERSION_HEADER};
use pgprobe_app::{Connector, RunError, VersionReport};
use pgprobe_db::{ConnectionParams, DbError, Session};

use common::test_params;

async fn run_to_string(connector: &Connector) -> (String, Result<VersionReport, RunError>) {
    let mut out = Vec::new();
    let result = connector.run(&mut out).await;
    (String::from_utf8(out).unwrap(), result)
}

#[tokio::test]
#[ignore]
async fn valid_credentials_print_banner_then_descriptor() {
    skip_if_no_postgres!();

    let (printed, result) = run_to_string(&Connector::new(test_params())).await;
    let report = result.expect("probe should succeed");

    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines[0], CONNECTING_NOTICE);
    assert_eq!(lines[1], VERSION_HEADER);
    assert!(lines[2].contains("PostgreSQL"), "banner line: {}", lines[2]);
    assert!(lines[3].contains(&format!("dbname={}", common::get_db())));
    assert_eq!(lines[4], CLOSED_NOTICE);
    assert_eq!(lines.len(), 5);

    assert_eq!(report.version.product(), Some("PostgreSQL"));
    assert!(report.version.version().is_some());
}

#[tokio::test]
#[ignore]
async fn wrong_password_prints_only_the_failure() {
    skip_if_no_postgres!();

    let params = ConnectionParams {
        password: Some("definitely-not-the-password".to_string()),
        ..test_params()
    };

    let (printed, result) = run_to_string(&Connector::new(params)).await;
    let err = result.unwrap_err();

    assert!(printed.contains("authentication"), "output: {printed}");
    assert!(!printed.contains(VERSION_HEADER));
    assert!(!printed.contains(CLOSED_NOTICE));
    assert!(err.as_db_error().is_some_and(DbError::is_authentication_failure));
}

#[tokio::test]
#[ignore]
async fn sequential_runs_do_not_share_a_connection() {
    skip_if_no_postgres!();

    let connector = Connector::new(test_params());
    let (first, first_result) = run_to_string(&connector).await;
    let (second, second_result) = run_to_string(&connector).await;

    assert!(first_result.is_ok());
    assert!(second_result.is_ok());
    assert_eq!(first, second);
    assert_eq!(first.matches(CLOSED_NOTICE).count(), 1);
}

#[tokio::test]
#[ignore]
async fn session_close_consumes_the_connection() {
    skip_if_no_postgres!();

    let mut session = Session::open(&test_params()).await.expect("connect");
    let version = session.server_version().await.expect("version");
    assert!(version.banner().starts_with("PostgreSQL"));
    session.close().await.expect("close");
}
