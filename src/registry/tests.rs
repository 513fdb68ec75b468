use super::*;
use crate::output::testing::{Event, RecordingRenderer};
use crate::transport::testing::ScriptedTransport;
use crate::transport::TransportError;

fn tree(entries: &[(&str, &str, &str)]) -> CommandTree {
    let mut tree = CommandTree::new();
    for (group, name, prompt) in entries {
        tree.entry(group.to_string()).or_default().insert(
            name.to_string(),
            PromptDefinition {
                system_prompt: prompt.to_string(),
            },
        );
    }
    tree
}

fn registry_with(tree: &CommandTree, transport: &Rc<ScriptedTransport>) -> CommandRegistry {
    CommandRegistry::build(
        tree,
        Some(Rc::clone(transport) as Rc<dyn CompletionTransport>),
    )
}

#[test]
fn test_build_one_group_per_entry_with_all_commands() {
    let transport = Rc::new(ScriptedTransport::fragments(&[]));
    let mut tree = tree(&[
        ("git", "commit", "Write a commit message"),
        ("git", "review", "Review"),
        ("shell", "explain", "Explain the command"),
    ]);
    tree.insert("empty".to_string(), BTreeMap::new());

    let registry = registry_with(&tree, &transport);

    let shape: Vec<(&str, usize)> = registry
        .groups()
        .iter()
        .map(|g| (g.name.as_str(), g.commands.len()))
        .collect();
    assert_eq!(shape, vec![("empty", 0), ("git", 2), ("shell", 1)]);
}

#[test]
fn test_build_sets_usage_and_help_text() {
    let transport = Rc::new(ScriptedTransport::fragments(&[]));
    let tree = tree(&[
        ("git", "review", "Review"),
        ("git", "commit", "Write a commit message"),
    ]);

    let registry = registry_with(&tree, &transport);

    let group = &registry.groups()[0];
    assert_eq!(group.usage, "Run git prompts");
    let names: Vec<&str> = group.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["commit", "review"]);
    assert_eq!(group.commands[0].system_prompt, "Write a commit message");
}

#[test]
fn test_build_without_transport_is_empty() {
    let tree = tree(&[("git", "commit", "Write a commit message")]);

    let registry = CommandRegistry::build(&tree, None);

    assert!(registry.is_empty());
    assert!(registry.find("git", "commit").is_none());
}

#[test]
fn test_build_empty_tree() {
    let transport = Rc::new(ScriptedTransport::fragments(&[]));

    let registry = registry_with(&CommandTree::new(), &transport);

    assert!(registry.is_empty());
}

#[test]
fn test_build_keeps_commands_with_empty_prompt() {
    let transport = Rc::new(ScriptedTransport::fragments(&[]));
    let tree = tree(&[("g", "s", "")]);

    let registry = registry_with(&tree, &transport);

    let command = registry.find("g", "s").unwrap();
    assert_eq!(command.system_prompt, "");
}

#[tokio::test]
async fn test_invoke_sends_only_its_own_prompt() {
    let transport = Rc::new(ScriptedTransport::fragments(&["ok"]));
    let tree = tree(&[("a", "x", "P1"), ("b", "y", "P2")]);
    let registry = registry_with(&tree, &transport);
    let mut renderer = RecordingRenderer::default();

    registry
        .invoke("a", "x", Some("hi"), &mut renderer)
        .await
        .unwrap()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system_prompt, "P1");
    assert_eq!(requests[0].user_prompt, "hi");
}

#[tokio::test]
async fn test_invoke_renders_echo_fragments_and_separator() {
    let transport = Rc::new(ScriptedTransport::fragments(&["Hel", "lo"]));
    let tree = tree(&[("g", "s", "Be kind")]);
    let registry = registry_with(&tree, &transport);
    let mut renderer = RecordingRenderer::default();

    registry
        .invoke("g", "s", Some("hello"), &mut renderer)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        renderer.events,
        vec![
            Event::SystemPrompt("Be kind".into()),
            Event::Fragment("Hel".into()),
            Event::Fragment("lo".into()),
            Event::Done,
            Event::Separator,
        ]
    );
}

#[tokio::test]
async fn test_empty_prompt_fails_without_calling_transport() {
    let transport = Rc::new(ScriptedTransport::fragments(&["unused"]));
    let tree = tree(&[("g", "s", "")]);
    let registry = registry_with(&tree, &transport);
    let mut renderer = RecordingRenderer::default();

    let result = registry
        .invoke("g", "s", Some("hello"), &mut renderer)
        .await
        .unwrap();

    assert!(matches!(result, Err(PromptError::MisconfiguredCommand { .. })));
    assert_eq!(transport.call_count(), 0);
    assert!(renderer.events.is_empty());
}

#[tokio::test]
async fn test_missing_input_prints_usage_without_calling_transport() {
    let transport = Rc::new(ScriptedTransport::fragments(&["unused"]));
    let tree = tree(&[("g", "s", "Be kind")]);
    let registry = registry_with(&tree, &transport);

    for input in [None, Some(""), Some("   ")] {
        let mut renderer = RecordingRenderer::default();
        let result = registry
            .invoke("g", "s", input, &mut renderer)
            .await
            .unwrap();

        assert!(matches!(result, Err(PromptError::MissingUserInput { .. })));
        assert_eq!(
            renderer.events,
            vec![Event::Usage("g".into(), "s".into())]
        );
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_stream_failure_still_prints_separator() {
    let transport = Rc::new(ScriptedTransport::new(vec![
        Ok("Par".to_string()),
        Err(TransportError::Stream("reset".into())),
    ]));
    let tree = tree(&[("g", "s", "Be kind")]);
    let registry = registry_with(&tree, &transport);
    let mut renderer = RecordingRenderer::default();

    let result = registry
        .invoke("g", "s", Some("hello"), &mut renderer)
        .await
        .unwrap();

    assert!(matches!(result, Err(PromptError::TransportStreamFailure(_))));
    assert_eq!(renderer.fragments(), vec!["Par"]);
    assert_eq!(renderer.events.last(), Some(&Event::Separator));
}

#[tokio::test]
async fn test_open_failure_reported_as_open_failure() {
    let transport = Rc::new(ScriptedTransport::failing_open("invalid api key"));
    let tree = tree(&[("g", "s", "Be kind")]);
    let registry = registry_with(&tree, &transport);
    let mut renderer = RecordingRenderer::default();

    let result = registry
        .invoke("g", "s", Some("hello"), &mut renderer)
        .await
        .unwrap();

    assert!(matches!(result, Err(PromptError::TransportOpenFailure(_))));
    assert_eq!(
        renderer.events,
        vec![Event::SystemPrompt("Be kind".into()), Event::Separator]
    );
}

#[tokio::test]
async fn test_invoke_unknown_command_returns_none() {
    let transport = Rc::new(ScriptedTransport::fragments(&[]));
    let tree = tree(&[("g", "s", "Be kind")]);
    let registry = registry_with(&tree, &transport);
    let mut renderer = RecordingRenderer::default();

    assert!(registry
        .invoke("g", "missing", Some("hi"), &mut renderer)
        .await
        .is_none());
    assert!(registry
        .invoke("missing", "s", Some("hi"), &mut renderer)
        .await
        .is_none());
}
