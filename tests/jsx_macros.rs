//! End-to-end compilation of `<Trans>` macro elements.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use swc_common::SourceMap;

use lingo::compiler::{CompileOptions, Mode};
use lingo::config::Config;
use lingo::lower::{CompiledSite, ModuleCompiler, ModuleOutput, SiteKind};
use lingo::parser::parse_source;

fn compile_with(source: &str, options: CompileOptions) -> ModuleOutput {
    let config = Config::default();
    let source_map = Arc::new(SourceMap::default());
    let parsed =
        parse_source(source.to_string(), "test.tsx", source_map).expect("source should parse");
    ModuleCompiler::new(&config.macro_modules, options).compile(&parsed.module)
}

fn compile(source: &str) -> ModuleOutput {
    compile_with(source, CompileOptions::default())
}

fn only_site(output: &ModuleOutput) -> &CompiledSite {
    assert_eq!(output.errors.len(), 0, "expected no errors: {:?}", output.errors);
    assert_eq!(output.sites.len(), 1);
    &output.sites[0]
}

fn value_keys(site: &CompiledSite) -> Vec<&str> {
    site.descriptor
        .values
        .iter()
        .map(|(key, _)| key.as_str())
        .collect()
}

fn component_keys(site: &CompiledSite) -> Vec<&str> {
    site.descriptor
        .components
        .iter()
        .map(|(key, _)| key.as_str())
        .collect()
}

#[test]
fn test_id_is_generated_from_message() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>Hello World</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(site.kind, SiteKind::Element);
    assert_eq!(site.descriptor.id, "mY42CM");
    assert_eq!(site.descriptor.message.as_deref(), Some("Hello World"));
}

#[test]
fn test_context_generates_a_different_id() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>Hello World</Trans>;
        <Trans context="my context">Hello World</Trans>;
        "#,
    );
    assert_eq!(output.sites.len(), 2);
    assert_eq!(output.sites[0].descriptor.id, "mY42CM");
    assert_eq!(output.sites[1].descriptor.id, "SO/WB8");
}

#[test]
fn test_custom_id_is_preserved() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans id="msg.hello">Hello World</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(site.descriptor.id, "msg.hello");
    assert_eq!(site.descriptor.message.as_deref(), Some("Hello World"));
}

#[test]
fn test_custom_id_as_expression_container() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans id={`msg.hello`}>Hello World</Trans>;
        "#,
    );
    assert_eq!(only_site(&output).descriptor.id, "msg.hello");
}

#[test]
fn test_macro_component_can_be_renamed() {
    let output = compile(
        r#"
        import { Trans as Trans2 } from '@lingui/react/macro';
        <Trans2>Hello World</Trans2>;
        "#,
    );
    assert_eq!(only_site(&output).descriptor.id, "mY42CM");
}

#[test]
fn test_variables_become_named_arguments() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>Hi {yourName}, my name is {myName}</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("Hi {yourName}, my name is {myName}")
    );
    assert_eq!(value_keys(site), vec!["yourName", "myName"]);
}

#[test]
fn test_repeated_variables_are_deduplicated() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>{duplicate} variable {duplicate}</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("{duplicate} variable {duplicate}")
    );
    assert_eq!(value_keys(site), vec!["duplicate"]);
}

#[test]
fn test_quoted_text_is_preserved() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>Speak "friend"!</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(site.descriptor.id, "NWmRwM");
    assert_eq!(site.descriptor.message.as_deref(), Some("Speak \"friend\"!"));
}

#[test]
fn test_complex_expressions_become_positional_arguments() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>
          Property {props.name},
          function {random()},
          array {array[index]},
          constant {42},
          everything {props.messages[index].value()}
        </Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("Property {0}, function {1}, array {2}, constant {3}, everything {4}")
    );
    assert_eq!(value_keys(site), vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn test_elements_are_replaced_with_numbered_placeholders() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>
          Hello <strong>World!</strong><br />
          <p>
            My name is <a href="/about">{" "}
            <em>{name}</em></a>
          </p>
        </Trans>;
        "#,
    );
    let site = only_site(&output);
    insta::assert_snapshot!(
        site.descriptor.message.as_deref().unwrap(),
        @"Hello <0>World!</0><1/><2>My name is <3> <4>{name}</4></3></2>"
    );
    assert_eq!(value_keys(site), vec!["name"]);
    assert_eq!(component_keys(site), vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn test_element_inside_expression_container() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>{<span>Component inside expression container</span>}</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("<0>Component inside expression container</0>")
    );
    assert_eq!(component_keys(site), vec!["0"]);
}

#[test]
fn test_element_without_children_self_closes() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>{<br />}</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(site.descriptor.message.as_deref(), Some("<0/>"));
    assert_eq!(component_keys(site), vec!["0"]);
}

#[test]
fn test_template_literals_as_children() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>{`How much is ${expression}? ${count}`}</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("How much is {expression}? {count}")
    );
    assert_eq!(value_keys(site), vec!["expression", "count"]);
}

#[test]
fn test_string_children_pass_icu_through() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>{"hello {count, plural, one {world} other {worlds}}"}</Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("hello {count, plural, one {world} other {worlds}}")
    );
    assert_eq!(value_keys(site), Vec::<&str>::new());
}

#[test]
fn test_whitespace_around_arguments_is_stripped() {
    let output = compile(
        r#"
        import { Trans } from "@lingui/react/macro";
        <Trans>
          Strip whitespace around arguments: '
          {name}
          '
        </Trans>
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("Strip whitespace around arguments: '{name}'")
    );
}

#[test]
fn test_forced_spaces_are_kept() {
    let output = compile(
        r#"
        import { Trans } from "@lingui/react/macro";
        <Trans>
          Strip whitespace around tags, but keep{" "}
          <strong>forced spaces</strong>
          !
        </Trans>
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("Strip whitespace around tags, but keep <0>forced spaces</0>!")
    );
}

#[test]
fn test_string_containers_keep_their_whitespace() {
    let output = compile(
        r#"
        import { Trans } from "@lingui/react/macro";
        <Trans>
          {"Wonderful framework "}
          <a href="https://nextjs.org">Next.js</a>
          {" say hi. And "}
          <a href="https://nextjs.org">Next.js</a>
          {" say hi."}
        </Trans>
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("Wonderful framework <0>Next.js</0> say hi. And <1>Next.js</1> say hi.")
    );
    assert_eq!(component_keys(site), vec!["0", "1"]);
}

#[test]
fn test_html_entities_are_decoded() {
    let output = compile(
        r#"
        import { Trans } from "@lingui/react/macro";
        <Trans>&amp;</Trans>
        "#,
    );
    assert_eq!(only_site(&output).descriptor.message.as_deref(), Some("&"));

    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>
          <Text>This should work &nbsp;</Text>
        </Trans>;
        "#,
    );
    let site = only_site(&output);
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("<0>This should work \u{a0}</0>")
    );
}

#[test]
fn test_jsx_comments_are_ignored() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>Hello {/* and I cannot stress this enough */} World</Trans>;
        "#,
    );
    assert_eq!(
        only_site(&output).descriptor.message.as_deref(),
        Some("Hello  World")
    );
}

#[test]
fn test_nested_macros_in_conditional_stay_isolated() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans>Hello, {props.world ? <Trans>world</Trans> : <Trans>guys</Trans>}</Trans>
        "#,
    );
    assert_eq!(output.errors.len(), 0);
    assert_eq!(output.sites.len(), 3);

    let outer = &output.sites[0];
    assert_eq!(outer.descriptor.message.as_deref(), Some("Hello, {0}"));
    assert_eq!(value_keys(outer), vec!["0"]);

    let inner_messages: Vec<&str> = output.sites[1..]
        .iter()
        .filter_map(|site| site.descriptor.message.as_deref())
        .collect();
    assert_eq!(inner_messages, vec!["world", "guys"]);

    // Every descriptor carries its own independently generated id.
    let mut ids: Vec<&str> = output
        .sites
        .iter()
        .map(|site| site.descriptor.id.as_str())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_macro_in_attribute_of_inner_element() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        import { t } from '@lingui/core/macro';
        <Trans>Read <a href="/more" title={t`Full content of ${articleName}`}>more</a></Trans>
        "#,
    );
    assert_eq!(output.errors.len(), 0);
    assert_eq!(output.sites.len(), 2);

    let outer = &output.sites[0];
    assert_eq!(outer.descriptor.message.as_deref(), Some("Read <0>more</0>"));
    assert_eq!(component_keys(outer), vec!["0"]);

    let inner = &output.sites[1];
    assert_eq!(inner.kind, SiteKind::Call);
    assert_eq!(inner.descriptor.id, "qzc3IN");
    assert_eq!(
        inner.descriptor.message.as_deref(),
        Some("Full content of {articleName}")
    );
    assert_eq!(value_keys(inner), vec!["articleName"]);
}

#[test]
fn test_choice_macro_in_attribute_of_plain_element() {
    let output = compile(
        r##"
        import { plural } from '@lingui/core/macro';
        <a href="/about" title={plural(count, {
          one: "# book",
          other: "# books"
        })}>About</a>
        "##,
    );
    let site = only_site(&output);
    assert_eq!(site.kind, SiteKind::Call);
    assert_eq!(site.descriptor.id, "esnaQO");
    assert_eq!(
        site.descriptor.message.as_deref(),
        Some("{count, plural, one {# book} other {# books}}")
    );
    assert_eq!(value_keys(site), vec!["count"]);
}

#[test]
fn test_production_keeps_only_essentials() {
    let output = compile_with(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans id="msg.hello" context="my context" comment="Hello World">Hello World</Trans>
        "#,
        CompileOptions {
            mode: Mode::Production,
            extract: false,
        },
    );
    let site = only_site(&output);
    assert_eq!(site.descriptor.id, "msg.hello");
    assert_eq!(site.descriptor.message, None);
    assert_eq!(site.descriptor.context, None);
    assert_eq!(site.descriptor.comment, None);
}

#[test]
fn test_extract_override_keeps_everything() {
    let output = compile_with(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans id="msg.hello" comment="Hello World">Hello World</Trans>
        "#,
        CompileOptions {
            mode: Mode::Production,
            extract: true,
        },
    );
    let site = only_site(&output);
    assert_eq!(site.descriptor.id, "msg.hello");
    assert_eq!(site.descriptor.message.as_deref(), Some("Hello World"));
    assert_eq!(site.descriptor.comment.as_deref(), Some("Hello World"));
}

#[test]
fn test_type_only_import_is_not_a_macro() {
    let output = compile(
        r#"
        import type { Trans } from '@lingui/react/macro';
        const cmp = <Trans>Hello</Trans>;
        "#,
    );
    assert_eq!(output.sites.len(), 0);
}

#[test]
fn test_empty_message_element_is_a_usage_error() {
    let output = compile(
        r#"
        import { Trans } from '@lingui/react/macro';
        <Trans></Trans>;
        "#,
    );
    assert_eq!(output.sites.len(), 0);
    assert_eq!(output.errors.len(), 1);
    assert!(output.errors[0].error.to_string().contains("message is empty"));
}
