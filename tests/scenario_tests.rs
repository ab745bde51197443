mod common;

use common::*;
use graph_inspector::coordinator::{
    AcquireError, AcquireSource, Affordance, BrowseContent, ContentArea, Panel,
};
use graph_inspector::engine::{EngineEvent, Generation, RequestTicket};
use graph_inspector::fetch::{FetchError, FetchResponse};
use graph_inspector::model::{
    DisplayOption, Documentation, NodeRef, SearchItem, SearchItemKind, PLACEHOLDER_FILENAME,
};

#[test]
fn test_fetch_then_render() {
    let (mut coordinator, log) = coordinator();

    coordinator.begin_fetch();
    let frame = coordinator.frame();
    assert_eq!(frame.content, ContentArea::Loading);
    assert!(!frame.ready);
    assert_eq!(frame.panel.panel, Panel::Hidden);

    let generation = coordinator
        .complete_fetch(Some(FetchResponse {
            payload: vec![7; 10],
            filename: Some("model.bin".to_string()),
        }))
        .unwrap();

    let files = coordinator.files().unwrap();
    assert_eq!(files.names(), vec!["model.bin"]);
    assert_eq!(files.files()[0].size(), 10);
    assert!(!coordinator.frame().ready);
    assert!(matches!(
        last_command(&log),
        Some(EngineCommand::Load { ref files, .. }) if files == &["model.bin"]
    ));

    coordinator.handle_engine_event(EngineEvent::Rendered { generation });
    let frame = coordinator.frame();
    assert!(frame.ready);
    assert_eq!(frame.content, ContentArea::Surface);
    assert_eq!(frame.panel.panel, Panel::Browse(BrowseContent::Full));
}

#[test]
fn test_fetch_without_name_uses_placeholder() {
    let (mut coordinator, _log) = coordinator();
    coordinator.begin_fetch();
    coordinator
        .complete_fetch(Some(FetchResponse {
            payload: vec![1, 2, 3],
            filename: None,
        }))
        .unwrap();

    assert_eq!(coordinator.files().unwrap().names(), vec![PLACEHOLDER_FILENAME]);
}

#[test]
fn test_empty_fetch_keeps_current_files() {
    let (mut coordinator, log) = coordinator();
    let generation = load_and_render(&mut coordinator, &["a.bin"]);
    let commands = log.lock().unwrap().len();

    coordinator.begin_fetch();
    assert!(!coordinator.frame().ready);
    assert!(matches!(
        coordinator.complete_fetch(None),
        Err(AcquireError::Empty)
    ));

    assert_eq!(coordinator.generation(), generation);
    assert_eq!(coordinator.files().unwrap().names(), vec!["a.bin"]);
    assert!(coordinator.frame().ready);
    assert_eq!(log.lock().unwrap().len(), commands);
}

#[test]
fn test_failed_fetch_leaves_uploader() {
    let (mut coordinator, _log) = coordinator();
    coordinator.begin_fetch();
    coordinator.fail_fetch(&FetchError::Disconnected);

    let frame = coordinator.frame();
    assert_eq!(frame.content, ContentArea::Uploader);
    assert!(frame.allows(Affordance::Upload));
    assert!(frame.allows(Affordance::DropFiles));
}

#[test]
fn test_drop_while_node_properties_open() {
    let (mut coordinator, log) = coordinator();
    let first = load_and_render(&mut coordinator, &["old.bin"]);
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation: first,
        properties: node_properties("conv1", "Conv"),
    });
    assert_eq!(coordinator.frame().panel.panel, Panel::NodeProperties);

    let second = coordinator
        .acquire(AcquireSource::Dropped(vec![
            handle("graph.json", b"{}"),
            handle("weights.bin", b"\x00\x01"),
        ]))
        .unwrap();

    assert_eq!(second, first.next());
    assert_eq!(
        coordinator.files().unwrap().names(),
        vec!["graph.json", "weights.bin"]
    );
    assert!(coordinator.selection().node_properties().is_none());
    let frame = coordinator.frame();
    assert!(!frame.ready);
    assert_eq!(frame.panel.panel, Panel::Hidden);
    assert!(matches!(
        last_command(&log),
        Some(EngineCommand::Load { generation, .. }) if generation == second
    ));

    coordinator.handle_engine_event(EngineEvent::Rendered { generation: second });
    assert_eq!(
        coordinator.frame().panel.panel,
        Panel::Browse(BrowseContent::Full)
    );
}

#[test]
fn test_search_results_arrive_later() {
    let (mut coordinator, log) = coordinator();
    load_and_render(&mut coordinator, &["model.bin"]);

    coordinator.set_query("conv1");
    assert_eq!(coordinator.search().query(), "conv1");
    assert!(coordinator.search().results().is_empty());

    let ticket = last_search_ticket(&log).unwrap();
    coordinator.handle_engine_event(EngineEvent::SearchResults {
        ticket,
        result: search_result("conv1", &["conv1_weights"]),
    });

    let results = coordinator.search().results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "conv1_weights");
}

#[test]
fn test_selecting_a_result() {
    let (mut coordinator, log) = coordinator();
    load_and_render(&mut coordinator, &["model.bin"]);
    coordinator.set_query("relu");
    let ticket = last_search_ticket(&log).unwrap();
    coordinator.handle_engine_event(EngineEvent::SearchResults {
        ticket,
        result: search_result("relu", &["relu1", "relu3"]),
    });

    let item = SearchItem::new("relu3", SearchItemKind::Node, NodeRef::new(1));
    coordinator.select_result(&item);

    assert_eq!(coordinator.search().query(), "relu3");
    assert_eq!(
        last_command(&log),
        Some(EngineCommand::Select("relu3".to_string()))
    );
    let names: Vec<&str> = coordinator
        .search()
        .results()
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["relu1", "relu3"]);
}

#[test]
fn test_search_unreachable_under_documentation() {
    let (mut coordinator, log) = coordinator();
    let generation = load_and_render(&mut coordinator, &["model.bin"]);
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation,
        properties: node_properties("conv1", "Conv"),
    });
    coordinator.request_node_documentation();
    let ticket = last_documentation_ticket(&log).unwrap();
    coordinator.handle_engine_event(EngineEvent::NodeDocumentation {
        ticket,
        documentation: Documentation {
            name: "Conv".to_string(),
            ..Documentation::default()
        },
    });

    let frame = coordinator.frame();
    assert_eq!(frame.panel.panel, Panel::NodeDocumentation);
    assert!(!frame.allows(Affordance::SearchInput));
    assert!(!frame.allows(Affordance::ModelProperties));
    assert!(!frame.allows(Affordance::ChangeModel));
    assert!(frame.allows(Affordance::CloseNodeDocumentation));
}

#[test]
fn test_stale_search_results_are_dropped() {
    let (mut coordinator, log) = coordinator();
    load_and_render(&mut coordinator, &["model.bin"]);

    coordinator.set_query("c");
    let first = last_search_ticket(&log).unwrap();
    coordinator.set_query("co");
    let second = last_search_ticket(&log).unwrap();
    assert!(second.sequence > first.sequence);

    coordinator.handle_engine_event(EngineEvent::SearchResults {
        ticket: second,
        result: search_result("co", &["conv1"]),
    });
    coordinator.handle_engine_event(EngineEvent::SearchResults {
        ticket: first,
        result: search_result("c", &["conv1", "concat"]),
    });

    assert_eq!(coordinator.search().results().len(), 1);
}

#[test]
fn test_results_for_replaced_files_are_dropped() {
    let (mut coordinator, log) = coordinator();
    let first = load_and_render(&mut coordinator, &["a.bin"]);
    coordinator.set_query("relu");
    let ticket = last_search_ticket(&log).unwrap();

    let second = load_and_render(&mut coordinator, &["b.bin"]);
    coordinator.handle_engine_event(EngineEvent::SearchResults {
        ticket,
        result: search_result("relu", &["relu1"]),
    });
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation: first,
        properties: node_properties("relu1", "Relu"),
    });

    assert_ne!(first, second);
    assert!(coordinator.search().results().is_empty());
    assert!(coordinator.selection().node_properties().is_none());
}

#[test]
fn test_render_of_replaced_files_does_not_open_the_gate() {
    let (mut coordinator, _log) = coordinator();
    let first = coordinator
        .acquire(AcquireSource::Dropped(vec![handle("a.bin", b"a")]))
        .unwrap();
    let second = coordinator
        .acquire(AcquireSource::Dropped(vec![handle("b.bin", b"b")]))
        .unwrap();

    coordinator.handle_engine_event(EngineEvent::Rendered { generation: first });
    assert!(!coordinator.frame().ready);

    coordinator.handle_engine_event(EngineEvent::Rendered { generation: second });
    assert!(coordinator.frame().ready);
}

#[test]
fn test_superseded_documentation_is_dropped() {
    let (mut coordinator, log) = coordinator();
    let generation = load_and_render(&mut coordinator, &["model.bin"]);
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation,
        properties: node_properties("conv1", "Conv"),
    });
    coordinator.request_node_documentation();
    let stale = last_documentation_ticket(&log).unwrap();

    // a different node arrives before the documentation does
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation,
        properties: node_properties("relu1", "Relu"),
    });
    coordinator.handle_engine_event(EngineEvent::NodeDocumentation {
        ticket: stale,
        documentation: Documentation {
            name: "Conv".to_string(),
            ..Documentation::default()
        },
    });

    assert_eq!(coordinator.frame().panel.panel, Panel::NodeProperties);
    assert!(coordinator.selection().node_documentation().is_none());
}

#[test]
fn test_documentation_after_closing_properties_is_dropped() {
    let (mut coordinator, log) = coordinator();
    let generation = load_and_render(&mut coordinator, &["model.bin"]);
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation,
        properties: node_properties("conv1", "Conv"),
    });
    coordinator.request_node_documentation();
    let ticket = last_documentation_ticket(&log).unwrap();

    // the panel is closed before the engine answers
    coordinator.close_node_properties();
    coordinator.handle_engine_event(EngineEvent::NodeDocumentation {
        ticket,
        documentation: Documentation {
            name: "Conv".to_string(),
            ..Documentation::default()
        },
    });

    assert_eq!(
        coordinator.frame().panel.panel,
        Panel::Browse(BrowseContent::Full)
    );
    assert!(coordinator.selection().node_documentation().is_none());
    assert!(coordinator.selection().node_properties().is_none());
}

#[test]
fn test_closing_documentation_returns_to_properties() {
    let (mut coordinator, log) = coordinator();
    let generation = load_and_render(&mut coordinator, &["model.bin"]);
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation,
        properties: node_properties("conv1", "Conv"),
    });
    coordinator.request_node_documentation();
    coordinator.handle_engine_event(EngineEvent::NodeDocumentation {
        ticket: last_documentation_ticket(&log).unwrap(),
        documentation: Documentation::default(),
    });
    assert_eq!(coordinator.frame().panel.panel, Panel::NodeDocumentation);

    coordinator.close_node_documentation();
    assert_eq!(coordinator.frame().panel.panel, Panel::NodeProperties);
    coordinator.close_node_properties();
    assert_eq!(
        coordinator.frame().panel.panel,
        Panel::Browse(BrowseContent::Full)
    );
}

#[test]
fn test_toggle_resets_search_and_pushes_options() {
    let (mut coordinator, log) = coordinator();
    load_and_render(&mut coordinator, &["model.bin"]);
    coordinator.set_query("conv");
    coordinator.handle_engine_event(EngineEvent::SearchResults {
        ticket: last_search_ticket(&log).unwrap(),
        result: search_result("conv", &["conv1"]),
    });

    coordinator.toggle_option(DisplayOption::Attributes);

    assert_eq!(coordinator.search().query(), "");
    assert!(coordinator.search().results().is_empty());
    assert!(coordinator.options().show_attributes);
    assert!(matches!(
        last_command(&log),
        Some(EngineCommand::SetDisplayOptions(options)) if options.show_attributes
    ));
}

#[test]
fn test_model_overlay_independent_of_panel() {
    let (mut coordinator, _log) = coordinator();
    let generation = load_and_render(&mut coordinator, &["model.bin"]);

    coordinator.request_model_properties();
    coordinator.handle_engine_event(EngineEvent::ModelProperties {
        generation,
        properties: node_properties("model", "onnx"),
    });
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation,
        properties: node_properties("conv1", "Conv"),
    });

    let frame = coordinator.frame();
    assert!(frame.panel.model_overlay);
    assert_eq!(frame.panel.panel, Panel::NodeProperties);

    coordinator.close_model_properties();
    assert!(!coordinator.frame().panel.model_overlay);
    assert_eq!(coordinator.frame().panel.panel, Panel::NodeProperties);
}

#[test]
fn test_search_mode_survives_file_change() {
    let (mut coordinator, _log) = coordinator();
    load_and_render(&mut coordinator, &["a.bin"]);
    coordinator.activate_search();
    coordinator.set_query("x");

    load_and_render(&mut coordinator, &["b.bin"]);
    assert!(coordinator.search().is_active());
    assert_eq!(coordinator.search().query(), "");
    assert_eq!(
        coordinator.frame().panel.panel,
        Panel::Browse(BrowseContent::SearchOnly)
    );
}

#[test]
fn test_documentation_ticket_carries_generation() {
    let (mut coordinator, log) = coordinator();
    let generation = load_and_render(&mut coordinator, &["model.bin"]);
    coordinator.handle_engine_event(EngineEvent::NodeProperties {
        generation,
        properties: node_properties("conv1", "Conv"),
    });
    coordinator.request_node_documentation();

    assert_eq!(
        last_documentation_ticket(&log),
        Some(RequestTicket {
            generation,
            sequence: 1
        })
    );
    assert_ne!(generation, Generation::default());
}
