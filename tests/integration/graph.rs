use crate::common::{deparse, module_chain, stdout_of};

#[test]
fn test_plantuml_graph() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "-g", "plantuml", "app.sjs"]));

    assert!(out.starts_with("@startuml\nskinparam packageStyle rect\n"));
    assert!(out.contains("package app {}\n"));
    assert!(out.contains("app +-- widgets\n"));
    assert!(out.contains("widgets +-- dom\n"));
    assert!(out.ends_with("@enduml\n"));
}

#[test]
fn test_dot_graph() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "--graph", "dot", "app.sjs"]));

    assert!(out.starts_with("digraph {"));
    assert!(out.contains("label = \"widgets\""));
    assert!(out.contains("tooltip = \"js:module\""));
    assert_eq!(out.matches("->").count(), 2);
}

#[test]
fn test_graph_honours_kind_filter() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "-g", "plantuml", "-t", "c:*", "app.sjs"]));
    assert_eq!(out, "@startuml\nskinparam packageStyle rect\n@enduml\n");
}
