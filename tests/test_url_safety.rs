use recipe_clipper::{validate_source_url, ExtractError};

fn assert_blocked(url: &str) {
    match validate_source_url(url) {
        Err(ExtractError::InvalidUrl(_)) => {}
        other => panic!("expected {url} to be rejected, got {other:?}"),
    }
}

#[test]
fn blocks_loopback_and_private_hosts() {
    for url in [
        "http://localhost/admin",
        "http://127.0.0.1:8080/",
        "http://127.255.255.254/",
        "http://0.0.0.0/",
        "http://10.0.0.5/internal",
        "http://172.16.9.1/",
        "http://172.31.255.255/",
        "http://192.168.1.10/router",
        "http://169.254.169.254/latest/meta-data/",
        "http://[::1]/",
    ] {
        assert_blocked(url);
    }
}

#[test]
fn blocks_non_http_schemes() {
    for url in [
        "file:///etc/passwd",
        "ftp://example.com/file.txt",
        "gopher://example.com/",
        "javascript:alert(1)",
    ] {
        assert_blocked(url);
    }
}

#[test]
fn blocks_localhost_subdomains_and_mapped_ipv6() {
    assert_blocked("http://internal.localhost/");
    assert_blocked("http://[::ffff:169.254.169.254]/");
}

#[test]
fn allows_public_hosts_near_blocked_ranges() {
    // Boundaries just outside the denylisted ranges.
    for url in [
        "http://172.15.0.1/",
        "http://172.32.0.1/",
        "http://11.0.0.1/",
        "http://192.169.0.1/",
        "https://www.youtube.com/watch?v=abc",
        "https://www.allrecipes.com/recipe/12345/",
    ] {
        assert!(validate_source_url(url).is_ok(), "expected {url} to pass");
    }
}

#[test]
fn rejects_empty_input() {
    assert_blocked("");
}
