use parley::{relay, ConfigLoader, ContextOp};

const CONFIG: &str = r#"
[context]
template = "plain"

[agents.planner]
system_prompt = "Break work into steps."

[agents.executor]
kind = "continuation"
default_source = "planner-fallback"
"#;

#[test]
fn configured_agents_exchange_messages() {
    let config = ConfigLoader::load_from_str(CONFIG).unwrap();
    let mut agents = config.build_agents(&config.transcript()).unwrap();

    let mut planner = agents.remove("planner").unwrap();
    let mut executor = agents.remove("executor").unwrap();

    planner.contribute("Ship the release").unwrap();
    assert_eq!(
        planner.last_update(),
        "system: Break work into steps.\nuser: Ship the release\n"
    );

    executor.contribute("untagged note").unwrap();
    assert_eq!(executor.last_update(), "untagged note");

    planner
        .contribute(ContextOp::append("1. tag 2. publish"))
        .unwrap();
    relay(&planner, &mut executor).unwrap();
    assert_eq!(executor.last_update(), "1. tag 2. publish");
    assert!(executor.info().starts_with("continuation agent"));
    assert!(planner.info().starts_with("turn agent"));
}
