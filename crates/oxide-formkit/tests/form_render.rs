//! Tests for rendering widgets and whole forms.

mod common;
use common::*;

use oxide_formkit::widgets::{
    HiddenWidget, SelectionFormat, SelectionWidget, StringWidget, TextAreaWidget, Widget,
    WidgetKind,
};
use oxide_formkit::{Bindings, Form, HtmlRenderer, SafeValues, ValidationErrors, Value};

#[test]
fn every_widget_is_well_formed() {
    let html = HtmlRenderer::default();
    for widget in every_widget() {
        assert_well_formed(&widget.render(&html));
    }
}

#[test]
fn every_widget_is_well_formed_when_disabled_with_errors() {
    let html = HtmlRenderer::new(3);
    for mut widget in every_widget() {
        widget.disable(true);
        widget.set_error_text("Something is wrong.");
        let out = widget.render(&html);
        assert_well_formed(&out);
        let markup_only = matches!(
            widget.kind(),
            WidgetKind::Hidden | WidgetKind::Html | WidgetKind::Paragraph
        );
        if !markup_only {
            assert!(
                out.contains(" error disabled\""),
                "{} lacks state classes",
                widget.name()
            );
        }
    }
}

#[test]
fn hostile_values_are_escaped_in_attributes() {
    let html = HtmlRenderer::default();
    let widgets: Vec<Box<dyn Widget>> = vec![
        Box::new(StringWidget::new("title", "Title").initial(HOSTILE)),
        Box::new(HiddenWidget::new("token", HOSTILE)),
        Box::new(StringWidget::new("code", "Code").initial(HOSTILE).disabled()),
        Box::new(
            SelectionWidget::new("n", "N", numbered_choices(2), SelectionFormat::List)
                .initial(HOSTILE)
                .disabled(),
        ),
    ];
    for widget in widgets {
        let out = widget.render(&html);
        assert_well_formed(&out);
        assert!(!out.contains("<script>"), "unescaped value in:\n{out}");
    }
}

#[test]
fn whole_form_is_well_formed() {
    let mut form = Form::new("everything", "/submit");
    for (i, widget) in every_widget().into_iter().enumerate() {
        let group = if i % 3 == 0 { "" } else if i % 3 == 1 { "first" } else { "second" };
        assert!(form.add_boxed_widget(widget, group));
    }
    form.add_button("Save", "", true);
    form.add_button("Cancel", "", false);

    let errors = ValidationErrors::new().with("title", "Too short.");
    let out = form.render(&Bindings::none().errors(&errors), 2);
    assert_well_formed(&out);
    assert!(out.starts_with("    <form action=\"/submit\""));
    assert!(out.ends_with("    </form>"));
}

#[test]
fn flex_selection_resolves_by_choice_count() {
    let html = HtmlRenderer::default();

    let six = SelectionWidget::new("n", "N", numbered_choices(6), SelectionFormat::Flex);
    assert_eq!(six.format(), SelectionFormat::List);
    let out = six.render(&html);
    assert!(out.contains("<select"));
    assert!(!out.contains("type=\"radio\""));

    let five = SelectionWidget::new("n", "N", numbered_choices(5), SelectionFormat::Flex);
    assert_eq!(five.format(), SelectionFormat::Individual);
    let out = five.render(&html);
    assert!(!out.contains("<select"));
    assert_eq!(out.matches("type=\"radio\"").count(), 5);
}

#[test]
fn removed_widget_is_gone() {
    let mut form = Form::new("f", "/");
    form.add_widget(StringWidget::new("a", "A"), "");
    form.add_widget(StringWidget::new("x", "X"), "g");
    form.add_widget(TextAreaWidget::new("b", "B"), "g");

    assert_eq!(form.remove_widgets(&["x"]), 1);
    assert!(form.get_widgets("").iter().all(|w| w.name() != "x"));
    assert!(!form.to_html(0).contains("field-x"));
    assert_eq!(form.remove_widgets(&["x"]), 0);
}

#[test]
fn groups_render_in_first_seen_order() {
    let mut form = Form::new("f", "/");
    form.add_widget(StringWidget::new("email", "Email"), "contact");
    form.add_widget(StringWidget::new("card", "Card"), "billing");
    form.add_widget(StringWidget::new("phone", "Phone"), "contact");

    let out = form.to_html(0);
    let contact = out.find("<legend>Contact</legend>").unwrap();
    let billing = out.find("<legend>Billing</legend>").unwrap();
    assert!(contact < billing);

    let phone = out.find("field-phone").unwrap();
    assert!(phone < billing);
}

#[test]
fn single_select_list_marks_bound_value() {
    let mut form = Form::new("f", "/");
    form.add_widget(
        SelectionWidget::new(
            "n",
            "Number",
            [("1", "One"), ("2", "Two")],
            SelectionFormat::List,
        )
        .no_default(),
        "",
    );

    let values = SafeValues::new().with("n", "2");
    let out = form.render(&Bindings::none().values(&values), 0);
    assert_eq!(out.matches("selected=\"selected\"").count(), 1);
    assert!(out.contains("<option value=\"2\" selected=\"selected\">Two</option>"));
}

#[test]
fn disabled_string_resubmits_its_value() {
    let mut form = Form::new("f", "/");
    form.add_widget(StringWidget::new("code", "Code").initial("abc"), "");
    assert_eq!(form.disable_widgets(&["code"]), 1);

    let out = form.to_html(0);
    assert_eq!(out.matches("type=\"text\"").count(), 1);
    assert_eq!(out.matches("disabled=\"disabled\"").count(), 1);
    assert_eq!(
        hidden_inputs(&out)
            .into_iter()
            .filter(|(name, _)| name == "code")
            .collect::<Vec<_>>(),
        vec![("code".to_string(), "abc".to_string())]
    );
    assert_eq!(out.matches("value=\"abc\"").count(), 2);
}

#[test]
fn multi_selection_binds_folded_list() {
    let mut form = Form::new("f", "/");
    form.add_widget(
        SelectionWidget::new("tags", "Tags", numbered_choices(4), SelectionFormat::Individual)
            .multiple(),
        "",
    );

    let values = SafeValues::sanitize([("tags[]", "2"), ("tags[]", "3")]);
    let out = form.render(&Bindings::none().values(&values), 0);
    assert_eq!(out.matches("checked=\"checked\"").count(), 2);
    assert_eq!(
        form.widget("tags").map(|w| w.value()),
        Some(Value::from(vec!["2", "3"]))
    );
}

#[test]
fn sanitized_values_are_not_double_escaped() {
    let mut form = Form::new("f", "/");
    form.add_widget(StringWidget::new("q", "Query"), "");

    let values = SafeValues::sanitize([("q", "fish & chips")]);
    let out = form.render(&Bindings::none().values(&values), 0);
    assert!(out.contains("value=\"fish &amp; chips\""));
}

#[test]
fn hidden_widgets_ignore_groups() {
    let mut form = Form::new("f", "/");
    form.add_widget(HiddenWidget::new("token", "t"), "secret");
    assert!(form.groups().is_empty());
    assert!(!form.to_html(0).contains("<fieldset"));
}

#[test]
fn indent_width_comes_from_renderer() {
    let mut form = Form::new("f", "/").with_renderer(HtmlRenderer::new(3));
    form.add_widget(StringWidget::new("a", "A"), "");
    let out = form.to_html(0);
    assert!(out.contains("\n   <ol class=\"field-list\">\n      <li>\n         <div"));

    form.renderer_mut().set_indent_spaces(0);
    assert_eq!(form.to_html(0), out);
}

#[test]
fn errors_bind_to_hidden_widgets_too() {
    let mut form = Form::new("f", "/");
    form.add_widget(StringWidget::new("a", "A"), "");
    form.add_widget(HiddenWidget::new("token", "t"), "");

    let errors = ValidationErrors::new()
        .with("a", "First.")
        .with("a", "Second.")
        .with("token", "Expired.");
    form.render(&Bindings::none().errors(&errors), 0);
    assert_eq!(
        form.widget("a").map(|w| w.error_text().to_string()),
        Some("First.<br />Second.".to_string())
    );
    assert_eq!(
        form.widget("token").map(|w| w.error_text().to_string()),
        Some("Expired.".to_string())
    );
}
