use super::*;
use pretty_assertions::assert_eq;

#[test]
fn function_doc_comment() {
    let functions = extract_source(SAMPLE);
    let foo = find_by_name(&functions, "Foo");
    assert_eq!(foo.doc_comment, "Foo does things.\n");
}

#[test]
fn multi_line_doc_keeps_paragraphs() {
    let functions = extract_source(
        "package p\n\
         \n\
         // Build compiles a target.\n\
         //\n\
         // It never caches.\n\
         func Build() {}\n",
    );
    let build = find_by_name(&functions, "Build");
    assert_eq!(build.doc_comment, "Build compiles a target.\n\nIt never caches.\n");
}

#[test]
fn separated_groups_are_joined_with_a_space() {
    let functions = extract_source(
        "package p\n\
         \n\
         // group one\n\
         \n\
         // group two\n\
         func Split() {}\n",
    );
    let split = find_by_name(&functions, "Split");
    assert_eq!(split.doc_comment, "group one\n group two\n");
}

#[test]
fn name_comment_overrides_field_comment() {
    let functions = extract_source(SAMPLE);
    let documented = find_by_name(&functions, "Documented");
    let docs: Vec<(&str, &str)> = documented
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.doc_comment.as_str()))
        .collect();
    assert_eq!(
        docs,
        vec![
            ("a", "a only\n"),
            ("b", "shared doc\n"),
            ("verbose", "verbose enables chatter\n"),
        ]
    );
}

#[test]
fn undocumented_parameters_have_empty_docs() {
    let functions = extract_source(SAMPLE);
    let foo = find_by_name(&functions, "Foo");
    assert!(foo.parameters.iter().all(|p| p.doc_comment.is_empty()));
}

#[test]
fn directives_are_not_documentation() {
    let functions = extract_source(
        "package p\n\
         \n\
         // Fast is quick.\n\
         //go:noinline\n\
         func Fast() {}\n",
    );
    let fast = find_by_name(&functions, "Fast");
    assert_eq!(fast.doc_comment, "Fast is quick.\n");
}

#[test]
fn block_comments_are_documentation() {
    let functions = extract_source(
        "package p\n\
         \n\
         /* Block explains itself. */\n\
         func Block() {}\n",
    );
    let block = find_by_name(&functions, "Block");
    assert_eq!(block.doc_comment, " Block explains itself.\n");
}
