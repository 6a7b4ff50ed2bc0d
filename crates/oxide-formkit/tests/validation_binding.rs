//! Tests for validating a submission and binding the outcome.

mod common;
use common::*;

use oxide_formkit::validation::{
    EmailValidator, NumberValidator, PersonNameValidator, RequiredValidator,
};
use oxide_formkit::widgets::{StringWidget, TextAreaWidget, Widget};
use oxide_formkit::{Bindings, FieldRules, Form, SubmittedValues};

fn signup() -> Form {
    let mut form = Form::new("signup", "/signup");
    form.add_widget(StringWidget::new("name", "Name").required(), "");
    form.add_widget(StringWidget::new("email", "Email").required(), "");
    form.add_widget(StringWidget::new("age", "Age"), "");
    form.add_widget(TextAreaWidget::new("bio", "Bio"), "");
    form
}

fn rules() -> FieldRules {
    FieldRules::new()
        .rule("name", "name", RequiredValidator::new())
        .rule("name", "name", PersonNameValidator::new().max_length(40))
        .rule("email", "e-mail", RequiredValidator::new())
        .rule("email", "e-mail", EmailValidator::new())
        .rule("age", "age", NumberValidator::new(Some(13.0), None))
}

#[test]
fn rejected_submission_renders_escaped_values_and_messages() {
    let submitted = SubmittedValues::new()
        .with("name", "<b>Ada</b>")
        .with("email", "ada@example")
        .with("age", "9")
        .with("bio", "</textarea><script>alert(1)</script>");

    let errors = rules().validate(&submitted);
    assert_eq!(errors.len(), 3);
    assert!(errors.field("bio").is_none());

    let values = submitted.sanitize();
    let mut form = signup();
    let html = form.render(&Bindings::none().values(&values).errors(&errors), 0);

    assert_well_formed(&html);
    assert!(!html.contains("<script>"));
    assert!(html.contains(r#"value="&lt;b&gt;Ada&lt;/b&gt;""#));
    assert!(html.contains("The age is smaller than the minimum allowed value (13)."));
    assert!(form
        .widget("email")
        .is_some_and(|w| w.error_text().starts_with("The e-mail contains")));
}

#[test]
fn accepted_submission_has_no_errors() {
    let submitted = SubmittedValues::new()
        .with("name", "Ada Lovelace")
        .with("email", "ada@example.com")
        .with("age", "36");

    let errors = rules().validate(&submitted);
    assert!(errors.is_empty(), "{errors}");

    let mut form = signup();
    let html = form.render(&Bindings::none().values(&submitted.sanitize()).errors(&errors), 0);
    assert!(!html.contains(" error\""));
}
