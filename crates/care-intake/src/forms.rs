//! Registration form definition
//!
//! The declarative description of the multi-section patient registration
//! form: personal information, medical information, identification, and
//! consent. Field names are the wire names the web client submits.

use care_common::CountryCode;
use care_forms::{
    Control, FieldDescriptor, FieldRules, FieldView, FormDefinition, FormSchema, SelectOption,
};

/// Physician roster offered in the primary-physician dropdown.
pub const PHYSICIANS: &[&str] = &[
    "John Green",
    "Leila Cameron",
    "David Livingston",
    "Evan Peter",
    "Jane Powell",
    "Alex Ramirez",
    "Jasmine Lee",
    "Alyana Cruz",
    "Hardik Sharma",
];

pub const GENDER_OPTIONS: &[&str] = &["male", "female", "other"];

pub const IDENTIFICATION_TYPES: &[&str] = &[
    "Birth Certificate",
    "Driver's License",
    "Medical Insurance Card/Policy",
    "Military ID Card",
    "National Identity Card",
    "Passport",
    "Resident Alien Card (Green Card)",
    "Social Security Card",
    "State ID Card",
    "Student ID Card",
    "Voter ID Card",
];

pub fn physician_options() -> Vec<SelectOption> {
    PHYSICIANS
        .iter()
        .map(|name| SelectOption::new(*name, format!("Dr. {name}")))
        .collect()
}

fn identification_type_options() -> Vec<SelectOption> {
    IDENTIFICATION_TYPES
        .iter()
        .map(|t| SelectOption::new(*t, *t))
        .collect()
}

fn gender_radio_group(view: FieldView<'_>) -> Control {
    Control::RadioGroup {
        selected: view.value.as_choice().map(str::to_string),
        options: GENDER_OPTIONS
            .iter()
            .map(|g| SelectOption::new(*g, *g))
            .collect(),
    }
}

fn document_drop(view: FieldView<'_>) -> Control {
    Control::FileDrop {
        files: view.value.as_files().map(<[_]>::to_vec).unwrap_or_default(),
    }
}

/// The full patient registration form.
pub fn registration_form() -> FormDefinition {
    let fields = vec![
        // Personal information
        FieldDescriptor::text("name")
            .label("Full name")
            .placeholder("ex: John Doe")
            .icon("user"),
        FieldDescriptor::text("email")
            .label("Email")
            .placeholder("ex: johndoe@example.com")
            .icon("email"),
        FieldDescriptor::phone("phone", CountryCode::RU)
            .label("Phone number")
            .placeholder("ex: (555) 123-4567"),
        FieldDescriptor::date("birthDate")
            .label("Date of Birth")
            .placeholder("Select your birth date"),
        FieldDescriptor::custom("gender", gender_radio_group).label("Gender"),
        FieldDescriptor::text("address")
            .label("Address")
            .placeholder("ex: 14th Street, New York"),
        FieldDescriptor::text("occupation")
            .label("Occupation")
            .placeholder("ex: Software Engineer"),
        FieldDescriptor::text("emergencyContactName")
            .label("Emergency contact name")
            .placeholder("Guardian's name"),
        FieldDescriptor::phone("emergencyContactNumber", CountryCode::RU)
            .label("Emergency contact number")
            .placeholder("ex: +1 (868) 579-9831"),
        // Medical information
        FieldDescriptor::select("primaryPhysician", physician_options())
            .label("Primary care physician")
            .placeholder("Select a physician"),
        FieldDescriptor::text("insuranceProvider")
            .label("Insurance provider")
            .placeholder("ex: BlueCross"),
        FieldDescriptor::text("insurancePolicyNumber")
            .label("Insurance policy number")
            .placeholder("ex: ABC1234567"),
        FieldDescriptor::textarea("allergies")
            .label("Allergies (if any)")
            .placeholder("ex: Peanuts, Penicillin, Pollen"),
        FieldDescriptor::textarea("currentMedication")
            .label("Current medications")
            .placeholder("ex: Ibuprofen 200mg, Levothyroxine 50mcg"),
        FieldDescriptor::textarea("familyMedicalHistory")
            .label("Family medical history (if relevant)")
            .placeholder("ex: Mother had breast cancer"),
        FieldDescriptor::textarea("pastMedicalHistory")
            .label("Past medical history")
            .placeholder("ex: Asthma diagnosis in childhood"),
        // Identification
        FieldDescriptor::select("identificationType", identification_type_options())
            .label("Identification type")
            .placeholder("Select an identification type"),
        FieldDescriptor::text("identificationNumber")
            .label("Identification number")
            .placeholder("ex: 1234567"),
        FieldDescriptor::custom("identificationDocument", document_drop)
            .label("Scanned copy of identification document"),
        // Consent
        FieldDescriptor::checkbox("treatmentConsent")
            .label("I consent to receive treatment for my health condition."),
        FieldDescriptor::checkbox("disclosureConsent").label(
            "I consent to the use and disclosure of my health information for treatment purposes.",
        ),
        FieldDescriptor::checkbox("privacyConsent")
            .label("I acknowledge that I have reviewed and agree to the privacy policy."),
    ];

    let schema = FormSchema::new()
        .rule("name", FieldRules::new().required().min_len(2).max_len(50))
        .rule("email", FieldRules::new().required().email())
        .rule("phone", FieldRules::new().required().phone())
        .rule("birthDate", FieldRules::new().required())
        .rule(
            "gender",
            FieldRules::new().required().message("Please select a gender"),
        )
        .rule("address", FieldRules::new().required().min_len(5).max_len(500))
        .rule(
            "occupation",
            FieldRules::new().required().min_len(2).max_len(500),
        )
        .rule(
            "emergencyContactName",
            FieldRules::new().required().min_len(2).max_len(50),
        )
        .rule("emergencyContactNumber", FieldRules::new().required().phone())
        .rule(
            "primaryPhysician",
            FieldRules::new()
                .required()
                .message("Select at least one physician"),
        )
        .rule(
            "insuranceProvider",
            FieldRules::new().required().min_len(2).max_len(50),
        )
        .rule(
            "insurancePolicyNumber",
            FieldRules::new().required().min_len(2).max_len(50),
        )
        .rule(
            "treatmentConsent",
            FieldRules::new()
                .must_accept()
                .message("You must consent to treatment in order to proceed"),
        )
        .rule(
            "disclosureConsent",
            FieldRules::new()
                .must_accept()
                .message("You must consent to disclosure in order to proceed"),
        )
        .rule(
            "privacyConsent",
            FieldRules::new()
                .must_accept()
                .message("You must consent to privacy in order to proceed"),
        );

    FormDefinition::new(fields, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_forms::FieldValue;

    #[test]
    fn declares_the_full_field_set() {
        let form = registration_form();
        assert_eq!(form.fields.len(), 22);

        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"emergencyContactNumber"));
        assert!(names.contains(&"identificationDocument"));
        assert!(names.contains(&"privacyConsent"));
    }

    #[test]
    fn empty_form_fails_validation_with_consent_messages() {
        let mut controller = registration_form().controller();
        assert!(!controller.validate_all());
        assert_eq!(
            controller.errors().get("privacyConsent").map(String::as_str),
            Some("You must consent to privacy in order to proceed")
        );
        assert!(controller.errors().contains_key("name"));
        // Optional fields stay clean.
        assert!(!controller.errors().contains_key("allergies"));
    }

    #[test]
    fn gender_renders_as_radio_group() {
        let mut controller = registration_form().controller();
        controller
            .change("gender", FieldValue::choice("other"))
            .unwrap();

        let rendered = controller.render().unwrap();
        let gender = rendered.iter().find(|f| f.name == "gender").unwrap();
        match &gender.control {
            Control::RadioGroup { selected, options } => {
                assert_eq!(selected.as_deref(), Some("other"));
                assert_eq!(options.len(), GENDER_OPTIONS.len());
            }
            other => panic!("unexpected control: {other:?}"),
        }
    }

    #[test]
    fn document_renders_as_file_drop() {
        let controller = registration_form().controller();
        let rendered = controller.render().unwrap();
        let doc = rendered
            .iter()
            .find(|f| f.name == "identificationDocument")
            .unwrap();
        assert_eq!(doc.control, Control::FileDrop { files: vec![] });
    }

    #[test]
    fn consent_checkboxes_suppress_the_shared_label() {
        let controller = registration_form().controller();
        let rendered = controller.render().unwrap();
        for name in ["treatmentConsent", "disclosureConsent", "privacyConsent"] {
            let field = rendered.iter().find(|f| f.name == name).unwrap();
            assert_eq!(field.label, None, "{name} must not render the shared label");
            assert!(matches!(field.control, Control::Checkbox { .. }));
        }
    }

    #[test]
    fn physician_options_are_labeled_with_honorific() {
        let options = physician_options();
        assert_eq!(options[0].value, "John Green");
        assert_eq!(options[0].label, "Dr. John Green");
    }
}
