use parley::agent::{ContinuationStrategy, TurnStrategy};
use parley::context::ConversationContext;
use parley::{relay, Agent, ChatTemplate, ContextOp, TagSchema, Transcript};

fn shared() -> Transcript {
    let mut t = Transcript::with_template(ChatTemplate::Plain);
    t.append("topic: release notes\n");
    t
}

#[test]
fn round_trip_between_two_agents() {
    let base = shared();
    let mut writer = Agent::new("writer", "Draft text.", &base, TurnStrategy::new());
    let mut critic = Agent::new("critic", "Review drafts.", &base, TurnStrategy::new());

    writer.contribute("Please draft the notes").unwrap();
    writer.contribute(ContextOp::append("v1 adds tagging")).unwrap();
    assert_eq!(writer.last_update(), "writer: v1 adds tagging\n");

    assert_eq!(writer.last_output(), "v1 adds tagging");

    relay(&writer, &mut critic).unwrap();
    assert_eq!(
        critic.last_update(),
        "system: Review drafts.\nwriter: v1 adds tagging\n"
    );

    critic.contribute(ContextOp::append("looks good")).unwrap();
    relay(&critic, &mut writer).unwrap();
    assert_eq!(writer.last_update(), "critic: looks good\n");
}

#[test]
fn agents_from_same_buffer_stay_isolated() {
    let base = shared();
    let mut a = Agent::new("a", "", &base, ContinuationStrategy);
    let mut b = Agent::new("b", "", &base, ContinuationStrategy);

    a.contribute("only in a").unwrap();
    b.contribute("only in b").unwrap();

    assert!(!a.context().text().contains("only in b"));
    assert!(!b.context().text().contains("only in a"));
    assert_eq!(base.text(), "topic: release notes\n");
}

#[test]
fn tag_survives_storage_in_transcript() {
    let schema = TagSchema::source();
    let mut log = Transcript::new();
    log.append(&schema.format("alice"));
    log.append("stored remark");

    let recovered = schema.extract(log.text());
    assert_eq!(recovered.source.as_deref(), Some("alice"));
    assert_eq!(recovered.cleaned, "stored remark");
}

#[test]
fn last_update_tracks_only_latest_contribution() {
    let mut agent = Agent::new("solo", "", &Transcript::new(), ContinuationStrategy);
    assert_eq!(agent.last_update(), "");
    agent.contribute("Hi").unwrap();
    assert_eq!(agent.last_update(), "Hi");
    agent.contribute("Bye").unwrap();
    assert_eq!(agent.last_update(), "Bye");
}
