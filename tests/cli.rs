//! Runs the built binary to check exit status and error reporting.

use std::process::{Command, Output};

fn run_binary(args: &[&str], dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heading-scraper"))
        .args(args)
        .current_dir(dir)
        .env_remove("HEADING_SCRAPER_URL")
        .env_remove("HEADING_SCRAPER_OUTPUT")
        .env_remove("HEADING_SCRAPER_MODE")
        .env_remove("HEADING_SCRAPER_LEVELS")
        .env_remove("HEADING_SCRAPER_TIMEOUT")
        .env_remove("HEADING_SCRAPER_CHROME")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

#[test]
fn failed_scrape_exits_nonzero_and_reports_once() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    let url = format!("http://127.0.0.1:{port}/");

    let output = run_binary(&["--url", &url, "--timeout", "5"], dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("Network error").count(),
        1,
        "stderr was:\n{stderr}"
    );
    assert!(stderr.contains("Failed to scrape"), "stderr was:\n{stderr}");
    assert!(!dir.path().join("titles.csv").exists());
}

#[tokio::test]
async fn successful_scrape_writes_default_output() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body("<h1>Overview</h1><h2>A</h2><h2>B</h2>")
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let url = server.url();

    let dir_path = dir.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || run_binary(&["--url", &url], &dir_path))
        .await
        .unwrap();

    assert!(
        output.status.success(),
        "stderr was:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("titles.csv")).unwrap(),
        "tag,title\nh1,Overview\nh2,A\nh2,B\n"
    );
}
