use serde_json::json;
use std::time::Duration;
use structlog_adapter::{
    log_error, Attr, Context, HandlerOptions, Level, Logger, TargetHandler, TargetLevel, Value,
    SOURCE_KEY,
};

mod common;

use common::{json_logger, without_time};

#[test]
fn group_error_round_trips_through_json() {
    let (json, buffer) = json_logger(TargetLevel::Debug);
    let log = Logger::new(TargetHandler::new(json, None));

    log.with_group("req").error("failed", [Attr::int("code", 500)]);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        without_time(lines[0].clone()),
        json!({"req": {"code": 500}, "msg": "failed", "level": "error"})
    );
}

#[test]
fn group_valued_attribute_with_source() {
    let (json, buffer) = json_logger(TargetLevel::Debug);
    let opts = HandlerOptions::default().with_add_source(true);
    let log = Logger::new(TargetHandler::new(json, Some(opts)));

    log_error!(
        log.with_group("group"),
        "group error",
        "groupKey" => Value::group([
            Attr::string("groupkey1", "groupValue1"),
            Attr::string("groupKey2", "groupValue2"),
        ])
    );

    let mut line = without_time(buffer.lines().remove(0));
    let source = line[SOURCE_KEY].as_object_mut().expect("source at root");
    assert!(source["file"].as_str().unwrap().ends_with("json_end_to_end.rs"));
    assert!(source["line"].as_str().unwrap().parse::<u32>().is_ok());
    assert_eq!(source["function"], module_path!());
    source.remove("line");

    assert_eq!(
        line,
        json!({
            "group": {
                "groupKey": {"groupkey1": "groupValue1", "groupKey2": "groupValue2"}
            },
            "level": "error",
            "msg": "group error",
            "source": {"file": file!(), "function": module_path!()}
        })
    );
}

#[test]
fn target_caller_flag_turns_on_source() {
    let (json, buffer) = json_logger(TargetLevel::Info);
    json.set_report_caller(true);
    let log = Logger::new(TargetHandler::new(json.clone(), None));

    log.with_group("g1").with_group("g2").info("nested", [Attr::string("k", "v")]);

    let line = without_time(buffer.lines().remove(0));
    assert_eq!(line["g1"], json!({"g2": {"k": "v"}}));
    assert_eq!(line[SOURCE_KEY]["line"].as_str().map(str::is_empty), Some(false));
    assert!(line["g1"]["g2"].get(SOURCE_KEY).is_none());
}

#[test]
fn level_changes_on_the_target_are_honored() {
    let (json, buffer) = json_logger(TargetLevel::Debug);
    let log = Logger::new(TargetHandler::new(json.clone(), None));
    let ctx = Context::background();

    assert!(log.enabled(&ctx, Level::DEBUG));
    log.debug("first", []);

    json.set_level(TargetLevel::Error);
    assert!(!log.enabled(&ctx, Level::WARN));
    log.warn("suppressed", []);
    log.error("second", []);

    let messages: Vec<_> = buffer.lines().iter().map(|l| l["msg"].clone()).collect();
    assert_eq!(messages, [json!("first"), json!("second")]);
}

#[test]
fn derived_loggers_stay_independent() {
    let (json, buffer) = json_logger(TargetLevel::Debug);
    let base = Logger::new(TargetHandler::new(json, None)).with([Attr::string("svc", "api")]);
    let a = base.with([Attr::string("k", "a")]);
    let b = base.with_group("b").with([Attr::string("k", "b")]);

    base.info("base", []);
    a.info("a", []);
    b.info("b", []);
    a.info("a again", [Attr::string("k", "record")]);

    let lines: Vec<_> = buffer.lines().into_iter().map(without_time).collect();
    assert_eq!(lines[0], json!({"svc": "api", "level": "info", "msg": "base"}));
    assert_eq!(lines[1], json!({"svc": "api", "k": "a", "level": "info", "msg": "a"}));
    assert_eq!(
        lines[2],
        json!({"b": {"svc": "api", "k": "b"}, "level": "info", "msg": "b"})
    );
    assert_eq!(
        lines[3],
        json!({"svc": "api", "k": "record", "level": "info", "msg": "a again"})
    );
}

#[test]
fn value_kinds_render() {
    #[derive(Debug)]
    struct Opaque {
        id: u8,
    }

    let (json, buffer) = json_logger(TargetLevel::Debug);
    let log = Logger::new(TargetHandler::new(json, None));

    log.info(
        "kinds",
        [
            Attr::new("flag", true),
            Attr::new("neg", -3),
            Attr::new("big", u64::MAX),
            Attr::new("ratio", 0.25),
            Attr::new("wait", Duration::from_micros(1500)),
            Attr::new("lazy", Value::lazy(|| Value::group([Attr::int("n", 9)]))),
            Attr::new("opaque", Value::any(Opaque { id: 4 })),
        ],
    );

    let line = without_time(buffer.lines().remove(0));
    assert_eq!(
        line,
        json!({
            "flag": true,
            "neg": -3,
            "big": u64::MAX,
            "ratio": 0.25,
            "wait": 1_500_000,
            "lazy": {"n": 9},
            "opaque": "Opaque { id: 4 }",
            "level": "info",
            "msg": "kinds"
        })
    );
}

#[test]
fn custom_levels_land_on_info() {
    let (json, buffer) = json_logger(TargetLevel::Info);
    let log = Logger::new(TargetHandler::new(json, None));

    log.log(&Context::background(), Level::new(2), "between", []);

    assert_eq!(buffer.lines()[0]["level"], "info");
}

#[test]
fn replace_attr_renames_and_drops() {
    let (json, buffer) = json_logger(TargetLevel::Debug);
    let opts = HandlerOptions::default().with_replace_attr(|groups, attr| match attr.key.as_str() {
        "token" => None,
        "user" if groups.is_empty() => Some(Attr::new("user_id", attr.value)),
        _ => Some(attr),
    });
    let log = Logger::new(TargetHandler::new(json, Some(opts)));

    log.with([Attr::string("token", "secret")])
        .info("login", [Attr::string("user", "u1")]);
    log.with_group("audit")
        .info("login", [Attr::string("user", "u2")]);

    let lines: Vec<_> = buffer.lines().into_iter().map(without_time).collect();
    assert_eq!(lines[0], json!({"user_id": "u1", "level": "info", "msg": "login"}));
    assert_eq!(
        lines[1],
        json!({"audit": {"user": "u2"}, "level": "info", "msg": "login"})
    );
}

#[test]
fn shared_target_across_threads() {
    let (json, buffer) = json_logger(TargetLevel::Debug);
    let log = Logger::new(TargetHandler::new(json, None));

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let log = log.with([Attr::int("worker", i)]);
            std::thread::spawn(move || {
                for n in 0..25 {
                    log.info("tick", [Attr::int("n", n)]);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), 100);
    for worker in 0..4 {
        let count = lines.iter().filter(|l| l["worker"] == worker).count();
        assert_eq!(count, 25);
    }
}
