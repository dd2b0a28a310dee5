//! Appointment form definitions

use care_forms::{FieldDescriptor, FieldRules, FormDefinition, FormSchema, SelectOption};

/// Patient-facing appointment request form. The physician roster is caller
/// content; intake owns the actual list.
pub fn request_form(physicians: Vec<SelectOption>) -> FormDefinition {
    let fields = vec![
        FieldDescriptor::select("physician", physicians)
            .label("Doctor")
            .placeholder("Select a doctor"),
        FieldDescriptor::date("schedule")
            .label("Expected appointment date")
            .date_format("MM/DD/YYYY - h:mm aa")
            .with_time(),
        FieldDescriptor::textarea("reason")
            .label("Appointment reason")
            .placeholder("Annual monthly check-up"),
        FieldDescriptor::textarea("note")
            .label("Comments/notes")
            .placeholder("Prefer afternoon appointments, if possible"),
    ];

    let schema = FormSchema::new()
        .rule(
            "physician",
            FieldRules::new().required().message("Select at least one doctor"),
        )
        .rule("schedule", FieldRules::new().required())
        .rule("reason", FieldRules::new().required().min_len(2).max_len(500));

    FormDefinition::new(fields, schema)
}

/// Admin cancellation form.
pub fn cancel_form() -> FormDefinition {
    let fields = vec![FieldDescriptor::textarea("cancellationReason")
        .label("Reason for cancellation")
        .placeholder("Urgent meeting came up")];

    let schema = FormSchema::new().rule(
        "cancellationReason",
        FieldRules::new().required().min_len(2).max_len(500),
    );

    FormDefinition::new(fields, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_forms::{Control, FieldValue};

    fn physicians() -> Vec<SelectOption> {
        vec![
            SelectOption::new("John Green", "Dr. John Green"),
            SelectOption::new("Leila Cameron", "Dr. Leila Cameron"),
        ]
    }

    #[test]
    fn schedule_field_includes_time_selection() {
        let controller = request_form(physicians()).controller();
        let rendered = controller.render().unwrap();
        let schedule = rendered.iter().find(|f| f.name == "schedule").unwrap();
        match &schedule.control {
            Control::DatePicker {
                show_time, format, ..
            } => {
                assert!(*show_time);
                assert_eq!(format, "MM/DD/YYYY - h:mm aa");
            }
            other => panic!("unexpected control: {other:?}"),
        }
    }

    #[test]
    fn request_form_requires_doctor_schedule_and_reason() {
        let mut controller = request_form(physicians()).controller();
        assert!(!controller.validate_all());
        assert_eq!(
            controller.errors().get("physician").map(String::as_str),
            Some("Select at least one doctor")
        );
        assert!(controller.errors().contains_key("schedule"));
        assert!(controller.errors().contains_key("reason"));
        // Notes are optional.
        assert!(!controller.errors().contains_key("note"));
    }

    #[test]
    fn cancel_form_requires_a_reason() {
        let mut controller = cancel_form().controller();
        assert!(!controller.validate_all());

        controller
            .change("cancellationReason", FieldValue::text("Double booked"))
            .unwrap();
        assert!(controller.validate_all());
    }
}
