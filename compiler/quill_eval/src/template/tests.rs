use super::*;
use pretty_assertions::assert_eq;
use quill_ir::{StringInterner, TreeBuilder};
use quill_value::{EvalErrorKind, RecordValue, Value};

fn greeting_registry() -> TemplateRegistry {
    let mut templates = TemplateRegistry::new();
    let mut b = templates.builder();
    let hi = b.text("Hi ");
    let name = b.field(["Name"]);
    let show = b.action(name);
    let root = b.list([hi, show]);
    let tree = b.build("greet", root);
    templates.insert(tree);
    templates
}

#[test]
fn test_template_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Template>();
}

#[test]
fn test_render_record() {
    let templates = greeting_registry();
    let data = Value::record(
        RecordValue::builder(templates.interner())
            .field("Name", "Ann")
            .build(),
    );
    let template = Template::new("greet", templates, FunctionTable::new()).unwrap();
    assert_eq!(template.name(), "greet");
    assert_eq!(template.render(&data).unwrap(), "Hi Ann");
}

#[test]
fn test_execute_into_sink() {
    let templates = greeting_registry();
    let data = Value::record(
        RecordValue::builder(templates.interner())
            .field("Name", "Bo")
            .build(),
    );
    let template = Template::new("greet", templates, FunctionTable::new()).unwrap();
    let mut out = Vec::new();
    template.execute(&mut out, &data).unwrap();
    assert_eq!(out, b"Hi Bo");
}

#[test]
fn test_missing_root_rejected() {
    let templates = greeting_registry();
    let Err(errors) = Template::new("nope", templates, FunctionTable::new()) else {
        panic!("template with a missing root was accepted");
    };
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().unwrap();
    assert_eq!(
        error.kind,
        ValidationErrorKind::UnknownTemplate {
            name: "nope".to_string()
        }
    );
    assert_eq!(error.to_string(), "template \"nope\": no such template \"nope\"");
}

#[test]
fn test_invalid_tree_rejected() {
    let mut templates = greeting_registry();
    let mut b = templates.builder();
    let root = b.break_node();
    let tree = b.build("loose", root);
    templates.insert(tree);

    let Err(errors) = Template::new("greet", templates, FunctionTable::new()) else {
        panic!("registry with a stray break was accepted");
    };
    let error = errors.iter().next().unwrap();
    assert_eq!(error.template, "loose");
    assert!(matches!(
        error.kind,
        ValidationErrorKind::ControlOutsideRange { .. }
    ));
}

#[test]
fn test_clones_share_registry() {
    let template = Template::new("greet", greeting_registry(), FunctionTable::new()).unwrap();
    let copy = template.clone();
    assert!(template.templates().ptr_eq(copy.templates()));
    assert!(template.functions().ptr_eq(copy.functions()));
}

#[test]
fn test_max_depth_applies_to_runs() {
    let mut templates = TemplateRegistry::new();
    let mut b = templates.builder();
    let arg = b.dot();
    let root = b.template_call("loop", arg);
    let tree = b.build("loop", root);
    templates.insert(tree);

    let template = Template::new("loop", templates, FunctionTable::new())
        .unwrap()
        .with_max_depth(Some(3));
    assert_eq!(template.config().max_depth, Some(3));

    let Err(err) = template.render(&Value::int(0)) else {
        panic!("unbounded recursion finished");
    };
    assert_eq!(err.kind, EvalErrorKind::RecursionLimitExceeded { depth: 3 });
    assert_eq!(err.backtrace.map(|trace| trace.len()), Some(3));
}

#[test]
fn test_render_host_data() {
    let mut templates = TemplateRegistry::new();
    let mut b = templates.builder();
    let dot = b.dot();
    let root = b.action(dot);
    let tree = b.build("main", root);
    templates.insert(tree);

    let template = Template::new("main", templates, FunctionTable::new()).unwrap();
    assert_eq!(template.render(&vec![1, 2, 3]).unwrap(), "[1 2 3]");
    assert_eq!(template.render("plain").unwrap(), "plain");
}

#[test]
fn test_render_replaces_invalid_utf8() {
    let mut templates = TemplateRegistry::new();
    let mut b = templates.builder();
    let root = b.text([b'a', 0xFF, b'b']);
    let tree = b.build("main", root);
    templates.insert(tree);

    let template = Template::new("main", templates, FunctionTable::new()).unwrap();
    assert_eq!(template.render(&Value::int(0)).unwrap(), "a\u{FFFD}b");
}

#[test]
fn test_unsupported_and_undefined_rejected_up_front() {
    let mut templates = TemplateRegistry::new();
    let mut b = templates.builder();
    let hi = b.text("Hi ");
    let dot = b.dot();
    let body = b.text("x");
    let with = b.with(dot, body, None);
    let var = b.variable("x");
    let show_var = b.action(var);
    let call = b.call("shout", std::iter::empty());
    let show_call = b.action(call);
    let root = b.list([hi, with, show_var, show_call]);
    let tree = b.build("main", root);
    templates.insert(tree);

    let Err(errors) = Template::new("main", templates, FunctionTable::new()) else {
        panic!("template with unsupported constructs was accepted");
    };
    let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ValidationErrorKind::UnsupportedConstruct { kind: "with" },
            ValidationErrorKind::UnsupportedConstruct { kind: "variable" },
            ValidationErrorKind::UnknownFunction {
                name: "shout".to_string()
            },
        ]
    );
}

#[test]
fn test_registered_function_accepted() {
    let mut templates = TemplateRegistry::new();
    let mut b = templates.builder();
    let items = b.field(["Items"]);
    let call = b.call("len", [items]);
    let root = b.action(call);
    let tree = b.build("main", root);
    templates.insert(tree);
    let functions = FunctionTable::with_builtins(templates.interner());

    assert!(Template::new("main", templates, functions).is_ok());
}

#[test]
fn test_foreign_tree_rejected() {
    let mut templates = greeting_registry();
    let other = StringInterner::new();
    for i in 0..10 {
        other.intern(&format!("pad{i}"));
    }
    let mut b = TreeBuilder::new(&other);
    let root = b.text("elsewhere");
    let tree = b.build("stray", root);
    templates.insert(tree);

    let Err(errors) = Template::new("greet", templates, FunctionTable::new()) else {
        panic!("registry holding a foreign tree was accepted");
    };
    let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(kinds, vec![ValidationErrorKind::ForeignTree]);
}
