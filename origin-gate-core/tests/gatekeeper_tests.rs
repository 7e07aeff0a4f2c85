use origin_gate_core::{evaluate, OriginPolicy, ReasonCode, Rule, Verdict};

const NONE: &[&str] = &[];

#[test]
fn test_same_origin_admits() {
    let verdict = evaluate("127.0.0.1:18789", "http://127.0.0.1:18789", NONE);
    assert!(verdict.ok);
    assert_eq!(verdict.reason, ReasonCode::SameOrigin);

    let verdict = evaluate("gateway.example.com:18789", "https://gateway.example.com:18789", NONE);
    assert_eq!(verdict, Verdict::admit(ReasonCode::SameOrigin));
}

#[test]
fn test_same_origin_ignores_scheme() {
    let http = evaluate("gateway.example.com:18789", "http://gateway.example.com:18789", NONE);
    let https = evaluate("gateway.example.com:18789", "https://gateway.example.com:18789", NONE);
    assert_eq!(http, Verdict::admit(ReasonCode::SameOrigin));
    assert_eq!(https, Verdict::admit(ReasonCode::SameOrigin));
}

#[test]
fn test_same_origin_requires_exact_port() {
    let verdict = evaluate("gateway.example.com:18789", "https://gateway.example.com:18790", NONE);
    assert_eq!(verdict, Verdict::deny(ReasonCode::OriginNotAllowed));
}

#[test]
fn test_hostname_case_insensitive() {
    let verdict = evaluate("gateway.example.com:18789", "https://GATEWAY.Example.COM:18789", NONE);
    assert_eq!(verdict, Verdict::admit(ReasonCode::SameOrigin));

    let verdict = evaluate("Gateway.Example.com:18789", "https://gateway.example.com:18789", NONE);
    assert_eq!(verdict, Verdict::admit(ReasonCode::SameOrigin));
}

#[test]
fn test_loopback_admits_regardless_of_request_host() {
    for origin in [
        "http://localhost:3000",
        "http://127.0.0.1:5173",
        "http://[::1]:8080",
        "https://localhost",
    ] {
        let verdict = evaluate("device.tail1234.ts.net", origin, NONE);
        assert_eq!(verdict, Verdict::admit(ReasonCode::LoopbackOrigin), "{}", origin);
    }
}

#[test]
fn test_loopback_lookalikes_deny() {
    for origin in [
        "http://localhost.attacker.com",
        "http://127.0.0.2:3000",
        "http://attacker.com.localhost.example",
    ] {
        let verdict = evaluate("device.tail1234.ts.net", origin, NONE);
        assert_eq!(verdict, Verdict::deny(ReasonCode::OriginNotAllowed), "{}", origin);
    }
}

#[test]
fn test_builtin_trusted_admits_regardless_of_request_host() {
    for origin in ["https://storyclaw.com", "https://app.storyclaw.com"] {
        let verdict = evaluate("device.tail1234.ts.net", origin, NONE);
        assert!(verdict.ok);
        assert_eq!(verdict.reason, ReasonCode::BuiltinTrusted);
    }
}

#[test]
fn test_builtin_trusted_requires_exact_scheme_and_host() {
    for origin in [
        "http://storyclaw.com",
        "https://storyclaw.com:8443",
        "https://evil.storyclaw.com",
        "https://storyclaw.com.attacker.com",
    ] {
        let verdict = evaluate("device.tail1234.ts.net", origin, NONE);
        assert_eq!(verdict, Verdict::deny(ReasonCode::OriginNotAllowed), "{}", origin);
    }
}

#[test]
fn test_allowlist_admits_exact_matches_only() {
    let allowed = ["https://control.example.com"];

    let verdict = evaluate("gateway.example.com:18789", "https://control.example.com", &allowed);
    assert_eq!(verdict, Verdict::admit(ReasonCode::Allowlisted));

    let verdict = evaluate("gateway.example.com:18789", "https://control.example.com:8443", &allowed);
    assert_eq!(verdict, Verdict::deny(ReasonCode::OriginNotAllowed));

    let verdict = evaluate("gateway.example.com:18789", "http://control.example.com", &allowed);
    assert_eq!(verdict, Verdict::deny(ReasonCode::OriginNotAllowed));

    let verdict = evaluate("gateway.example.com:18789", "https://sub.control.example.com", &allowed);
    assert_eq!(verdict, Verdict::deny(ReasonCode::OriginNotAllowed));
}

#[test]
fn test_allowlist_order_irrelevant() {
    let forward = ["https://a.example.com", "https://control.example.com"];
    let reverse = ["https://control.example.com", "https://a.example.com"];
    assert_eq!(
        evaluate("gateway.example.com", "https://control.example.com", &forward),
        evaluate("gateway.example.com", "https://control.example.com", &reverse),
    );
}

#[test]
fn test_missing_origin_denies() {
    let verdict = evaluate("gateway.example.com:18789", "", NONE);
    assert!(!verdict.ok);
    assert_eq!(verdict.reason, ReasonCode::MissingOrInvalidOrigin);
}

#[test]
fn test_malformed_origins_deny() {
    for origin in [
        "null",
        "   ",
        "gateway.example.com",
        "http://",
        "https://gateway.example.com:99999",
        "https://gateway.example.com/path",
        "https://gateway.example.com?q=1",
        "https://gateway.example.com#x",
        "https://user@gateway.example.com",
        "javascript:alert(1)",
        "https://gateway\t.example.com",
        "https://gateway.example.com\\",
        "https://%67ateway.example.com",
    ] {
        let verdict = evaluate("gateway.example.com", origin, &["https://gateway.example.com"]);
        assert_eq!(
            verdict,
            Verdict::deny(ReasonCode::MissingOrInvalidOrigin),
            "{}",
            origin
        );
    }
}

#[test]
fn test_rewritten_spellings_never_reach_trusted_rules() {
    for origin in [
        "https://story\tclaw.com",
        "https://storyclaw.com\\",
        "http://local\thost:3000",
        "http://%6Cocalhost",
        "http://2130706433",
    ] {
        let verdict = evaluate("device.tail1234.ts.net", origin, NONE);
        assert_eq!(
            verdict,
            Verdict::deny(ReasonCode::MissingOrInvalidOrigin),
            "{:?}",
            origin
        );
    }
}

#[test]
fn test_unrelated_origin_denies() {
    let verdict = evaluate("gateway.example.com:18789", "https://attacker.example.com", NONE);
    assert!(!verdict.ok);
    assert_eq!(verdict.reason, ReasonCode::OriginNotAllowed);
}

#[test]
fn test_rule_precedence_order() {
    assert_eq!(
        Rule::ORDER,
        [
            Rule::SameOrigin,
            Rule::LoopbackOrigin,
            Rule::BuiltinTrusted,
            Rule::Allowlisted,
        ]
    );

    // Loopback and allowlisted at once: loopback decides, allowlist never consulted.
    let policy = OriginPolicy::new(["http://localhost:3000"]);
    let rules = policy
        .matching_rules("device.tail1234.ts.net", "http://localhost:3000")
        .unwrap();
    assert_eq!(rules, vec![Rule::LoopbackOrigin, Rule::Allowlisted]);
    assert_eq!(
        policy.evaluate("device.tail1234.ts.net", "http://localhost:3000").reason,
        ReasonCode::LoopbackOrigin
    );

    // Same-origin outranks loopback.
    let rules = policy
        .matching_rules("127.0.0.1:18789", "http://127.0.0.1:18789")
        .unwrap();
    assert_eq!(rules, vec![Rule::SameOrigin, Rule::LoopbackOrigin]);
    assert_eq!(
        policy.evaluate("127.0.0.1:18789", "http://127.0.0.1:18789").reason,
        ReasonCode::SameOrigin
    );

    // Builtin outranks allowlist.
    let policy = OriginPolicy::new(["https://storyclaw.com"]);
    let rules = policy
        .matching_rules("device.tail1234.ts.net", "https://storyclaw.com")
        .unwrap();
    assert_eq!(rules, vec![Rule::BuiltinTrusted, Rule::Allowlisted]);
    assert_eq!(
        policy.evaluate("device.tail1234.ts.net", "https://storyclaw.com").reason,
        ReasonCode::BuiltinTrusted
    );
}

#[test]
fn test_loopback_absent_from_allowlist_still_admits() {
    let verdict = evaluate(
        "gateway.example.com:18789",
        "http://localhost:5173",
        &["https://control.example.com"],
    );
    assert_eq!(verdict, Verdict::admit(ReasonCode::LoopbackOrigin));
}

#[test]
fn test_default_port_normalisation() {
    let cases = [
        ("example.com:443", "https://example.com", true),
        ("example.com", "https://example.com", true),
        ("example.com", "https://example.com:443", true),
        ("example.com:80", "http://example.com", true),
        ("example.com:443", "http://example.com", false),
        ("example.com", "https://example.com:8443", false),
        ("example.com:8443", "https://example.com", false),
    ];
    for (host, origin, admit) in cases {
        let verdict = evaluate(host, origin, NONE);
        assert_eq!(verdict.ok, admit, "{} / {}", host, origin);
        if admit {
            assert_eq!(verdict.reason, ReasonCode::SameOrigin);
        }
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let policy = OriginPolicy::new(["https://control.example.com"]);
    let inputs = [
        ("127.0.0.1:18789", "http://127.0.0.1:18789"),
        ("device.tail1234.ts.net", "http://localhost:3000"),
        ("device.tail1234.ts.net", "https://app.storyclaw.com"),
        ("gateway.example.com:18789", "https://control.example.com"),
        ("gateway.example.com:18789", ""),
        ("gateway.example.com:18789", "https://attacker.example.com"),
    ];
    for (host, origin) in inputs {
        let first = policy.evaluate(host, origin);
        for _ in 0..3 {
            assert_eq!(policy.evaluate(host, origin), first);
        }
        assert_eq!(evaluate(host, origin, &["https://control.example.com"]), first);
    }
}

#[test]
fn test_concurrent_evaluation() {
    let policy = std::sync::Arc::new(OriginPolicy::new(["https://control.example.com"]));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let policy = policy.clone();
            std::thread::spawn(move || {
                (0..100)
                    .map(|_| policy.evaluate("gateway.example.com", "https://control.example.com"))
                    .all(|v| v == Verdict::admit(ReasonCode::Allowlisted))
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
