use clipstack_core::{Birthday, Gender, MAX_DISPLAY_NAME_CHARS, MAX_LANGUAGE_TAG_CHARS};

use super::operation::CreateProfileInput;
use crate::operations::{ValidationError, ValidationErrorCollector, ValidationErrors};
use crate::traits::MediaUpload;

/// Profile input that passed every check.
#[derive(Debug, Clone)]
pub(super) struct ValidatedProfile {
    pub(super) display_name: String,
    pub(super) preferred_language: String,
    pub(super) gender: Gender,
    pub(super) biography: Option<String>,
    pub(super) birthday: Option<Birthday>,
    pub(super) avatar: Option<MediaUpload>,
}

/// Checks every field of `input`, collecting all problems before failing.
pub(super) fn validate(
    input: CreateProfileInput,
    max_upload_bytes: u64,
) -> Result<ValidatedProfile, ValidationErrors> {
    let mut collector = ValidationErrorCollector::new();

    let display_name = collector
        .text("display_name", &input.display_name, Some(MAX_DISPLAY_NAME_CHARS))
        .map(str::to_string);
    let preferred_language = collector
        .text(
            "preferred_language",
            &input.preferred_language,
            Some(MAX_LANGUAGE_TAG_CHARS),
        )
        .map(str::to_string);
    let gender = collector
        .text("gender", &input.gender, None)
        .and_then(|raw| collector.parsed("gender", raw.parse::<Gender>()));
    let birthday = match input.birthday.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => collector.parsed("birthday", Birthday::parse(raw)),
    };

    if let Some(avatar) = &input.avatar {
        if !avatar.is_image() {
            collector.push(ValidationError::NotAnImage {
                content_type: avatar.content_type.clone(),
            });
        }
        collector.file("avatar", avatar.size(), max_upload_bytes);
    }

    match (collector.into_errors(), display_name, preferred_language, gender) {
        (None, Some(display_name), Some(preferred_language), Some(gender)) => Ok(ValidatedProfile {
            display_name,
            preferred_language,
            gender,
            biography: input
                .biography
                .map(|bio| bio.trim().to_string())
                .filter(|bio| !bio.is_empty()),
            birthday,
            avatar: input.avatar,
        }),
        (Some(errors), ..) => Err(errors),
        (None, display_name, preferred_language, _) => {
            let field = if display_name.is_none() {
                "display_name"
            } else if preferred_language.is_none() {
                "preferred_language"
            } else {
                "gender"
            };
            Err(ValidationErrors::single(ValidationError::Blank { field }))
        }
    }
}

#[cfg(test)]
mod tests {
    use clipstack_core::CoreError;

    use super::*;

    fn input() -> CreateProfileInput {
        CreateProfileInput {
            display_name: "  Ada Lovelace ".to_string(),
            preferred_language: "en".to_string(),
            gender: "female".to_string(),
            biography: Some("   ".to_string()),
            avatar: None,
            birthday: Some("1815-12-10".to_string()),
        }
    }

    #[test]
    fn accepts_complete_input_and_normalizes_text() {
        let profile = validate(input(), 1024).expect("valid");

        assert_eq!(profile.display_name, "Ada Lovelace");
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.biography, None);
        assert_eq!(
            profile.birthday.map(|b| b.to_string()).as_deref(),
            Some("1815-12-10")
        );
    }

    #[test]
    fn blank_birthday_is_treated_as_absent() {
        let profile = validate(
            CreateProfileInput {
                birthday: Some(String::new()),
                ..input()
            },
            1024,
        )
        .expect("valid");

        assert_eq!(profile.birthday, None);
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let errors = validate(
            CreateProfileInput {
                gender: "alien".to_string(),
                ..input()
            },
            1024,
        )
        .expect_err("invalid gender")
        .into_vec();

        assert_eq!(
            errors,
            vec![ValidationError::Invalid {
                field: "gender",
                source: CoreError::InvalidGender("alien".to_string()),
            }]
        );
    }

    #[test]
    fn collects_every_problem() {
        let errors = validate(
            CreateProfileInput {
                display_name: "x".repeat(MAX_DISPLAY_NAME_CHARS + 1),
                preferred_language: " ".to_string(),
                gender: String::new(),
                biography: None,
                avatar: Some(MediaUpload::new("cv.pdf", "application/pdf", Vec::new())),
                birthday: Some("13/05/1990".to_string()),
            },
            1024,
        )
        .expect_err("many problems");

        let fields: Vec<_> = errors
            .iter()
            .map(|e| match e {
                ValidationError::Blank { field }
                | ValidationError::TooLong { field, .. }
                | ValidationError::Invalid { field, .. }
                | ValidationError::EmptyFile { field } => *field,
                ValidationError::NotAnImage { .. } => "avatar_type",
                other => panic!("unexpected error {other:?}"),
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                "display_name",
                "preferred_language",
                "gender",
                "birthday",
                "avatar_type",
                "avatar"
            ]
        );
    }

    #[test]
    fn avatar_over_limit_is_rejected() {
        let errors = validate(
            CreateProfileInput {
                avatar: Some(MediaUpload::new("a.png", "image/png", vec![0; 11])),
                ..input()
            },
            10,
        )
        .expect_err("too large")
        .into_vec();

        assert_eq!(
            errors,
            vec![ValidationError::FileTooLarge {
                field: "avatar",
                size: 11,
                max: 10
            }]
        );
    }
}
