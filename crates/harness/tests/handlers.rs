use loadout_core::{Stat, wire::decode_stats_response};
use loadout_engine::Request;
use loadout_harness::TestBackend;

fn upgrade_body(skill: &str, character_index: u32, upgrade_point_index: u32) -> String {
    serde_json::json!({
        "skill": skill,
        "character_index": character_index,
        "upgrade_point_index": upgrade_point_index,
    })
    .to_string()
}

// ============================================================================
// Fetch / create / save
// ============================================================================

#[test]
fn fetch_before_create_is_404() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_player();
    let resp = backend.handle(&backend.player(p).request("GET", "/stats"));
    assert_eq!(resp.status, 404);
    assert_eq!(resp.error_code(), Some("record_not_found"));
}

#[test]
fn create_then_fetch() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    let resp = backend.handle(&player.request("GET", "/stats"));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["UserId"], player.user_id.as_str());
    for stat in Stat::ALL {
        assert_eq!(resp.body[stat.as_str()], "0", "{stat}");
    }
    Ok(())
}

#[test]
fn save_overwrites_and_normalizes() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    let body = r#"{"UserId":"intruder","Speed":"160","Reload":"abc","Wins":7,"Legacy":"1"}"#;
    let resp = backend.handle(&player.request("PUT", "/stats").with_body(body));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["UserId"], player.user_id.as_str());
    assert_eq!(resp.body["Speed"], "160");
    assert_eq!(resp.body["Reload"], "0");
    assert_eq!(resp.body["Wins"], "7");
    assert!(resp.body.get("Legacy").is_none());

    let fetched = backend.handle(&player.request("GET", "/stats"));
    assert_eq!(fetched.body, resp.body);
    Ok(())
}

#[test]
fn save_without_body_is_400() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let resp = backend.handle(&backend.player(p).request("PUT", "/stats"));
    assert_eq!(resp.status, 400);
}

// ============================================================================
// Upgrades
// ============================================================================

#[test]
fn speed_upgrade_adds_thirty() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    backend.handle(&player.request("PUT", "/stats").with_body(r#"{"Speed":"100"}"#));
    let resp = backend.handle(
        &player
            .request("POST", "/stats/upgrade")
            .with_body(upgrade_body("speed", 0, 0)),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["Speed"], "130");
    Ok(())
}

#[test]
fn skill_names_fold_case() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    for skill in ["reload", "RELOAD", "Reload"] {
        let resp = backend.handle(
            &player
                .request("POST", "/stats/upgrade")
                .with_body(upgrade_body(skill, 0, 0)),
        );
        assert_eq!(resp.status, 200);
    }
    let resp = backend.handle(&player.request("GET", "/stats"));
    assert_eq!(resp.body["Reload"], "3");
}

#[test]
fn epoint_assigns_upgrade_point_index() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    backend.handle(&player.request("PUT", "/stats").with_body(r#"{"EPoint":"11"}"#));
    let resp = backend.handle(
        &player
            .request("POST", "/stats/upgrade")
            .with_body(upgrade_body("epoint", 6, 3)),
    );
    assert_eq!(resp.body["EPoint"], "3");
}

#[test]
fn character_slot_assigns_character_index() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    let resp = backend.handle(
        &player
            .request("POST", "/stats/upgrade")
            .with_body(r#"{"skill":"character3","character_index":5}"#),
    );
    assert_eq!(resp.body["Character3"], "5");
    assert_eq!(resp.body["EPoint"], "0");
}

#[test]
fn unknown_skill_changes_nothing() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    backend.handle(&player.request("PUT", "/stats").with_body(r#"{"Armor":"2","Zoom":"4"}"#));
    let before = backend.handle(&player.request("GET", "/stats"));
    let resp = backend.handle(
        &player
            .request("POST", "/stats/upgrade")
            .with_body(upgrade_body("unknownskill", 9, 9)),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, before.body);
}

#[test]
fn upgrade_repairs_malformed_history() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    backend.handle(&player.request("PUT", "/stats").with_body(r#"{"MagSize":"lots"}"#));
    let resp = backend.handle(
        &player
            .request("POST", "/stats/upgrade")
            .with_body(upgrade_body("magsize", 0, 0)),
    );
    assert_eq!(resp.body["MagSize"], "1");
}

// ============================================================================
// Match results
// ============================================================================

#[test]
fn match_results_accumulate() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    for outcome in ["win", "loss", "win"] {
        let body = format!(r#"{{"outcome":"{outcome}"}}"#);
        let resp = backend.handle(&player.request("POST", "/stats/match").with_body(body));
        assert_eq!(resp.status, 200);
    }
    let resp = backend.handle(&player.request("GET", "/stats"));
    assert_eq!(resp.body["Wins"], "2");
    assert_eq!(resp.body["Losses"], "1");

    let resp = backend.handle(
        &player
            .request("POST", "/stats/match")
            .with_body(r#"{"outcome":"draw"}"#),
    );
    assert_eq!(resp.status, 400);
}

// ============================================================================
// Failure kinds
// ============================================================================

#[test]
fn revoked_token_is_401() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    backend.revoke(p);
    let resp = backend.handle(&backend.player(p).request("GET", "/stats"));
    assert_eq!(resp.status, 401);
    assert_eq!(resp.error_code(), Some("authentication_failed"));
}

#[test]
fn malformed_authorization_is_401() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let token = backend.player(p).token.clone();
    for header in [token.as_str(), "Basic abc", "Bearer"] {
        let req = Request::new("GET", "/stats").with_header("Authorization", header);
        assert_eq!(backend.handle(&req).status, 401, "{header}");
    }
}

#[test]
fn store_outage_is_503_and_recovers() {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    backend.set_store_offline(true);
    let resp = backend.handle(&player.request("GET", "/stats"));
    assert_eq!(resp.status, 503);
    assert_eq!(resp.error_code(), Some("store_unavailable"));

    backend.set_store_offline(false);
    assert_eq!(backend.handle(&player.request("GET", "/stats")).status, 200);
}

#[test]
fn players_are_isolated() {
    let mut backend = TestBackend::in_memory();
    let a = backend.add_registered_player();
    let b = backend.add_registered_player();

    backend.handle(
        &backend
            .player(a)
            .request("POST", "/stats/upgrade")
            .with_body(upgrade_body("armor", 0, 0)),
    );
    let resp = backend.handle(&backend.player(b).request("GET", "/stats"));
    assert_eq!(resp.body["Armor"], "0");
}

// ============================================================================
// Client side
// ============================================================================

#[test]
fn client_decodes_service_response() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = TestBackend::in_memory();
    let p = backend.add_registered_player();
    let player = backend.player(p);

    backend.handle(
        &player
            .request("POST", "/stats/upgrade")
            .with_body(upgrade_body("speed", 0, 0)),
    );
    let resp = backend.handle(&player.request("GET", "/stats"));
    let record = decode_stats_response(resp.status, &resp.body.to_string())?;
    assert_eq!(record.get(Stat::Speed), 30);
    assert_eq!(record.get(Stat::Reload), 0);

    let missing = backend.handle(&Request::new("GET", "/stats"));
    assert!(decode_stats_response(missing.status, &missing.body.to_string()).is_err());
    Ok(())
}
