//! Settings model and lifecycle (init / update / unset / display)
//!
//! A `Settings` value is transient: it is reconstructed from the persisted
//! file on every command invocation. The persisted file is the single source
//! of truth.

use crate::{SettingsError, SettingsResult};
use serde::Serialize;
use std::env;
use std::fmt;

/// Environment variable consulted when no editor command is configured.
pub const EDITOR_ENV: &str = "EDITOR";

/// Persisted quill configuration.
///
/// `markdown_textwrap` is signed so that a non-positive value read from a
/// file reaches validation instead of failing during coercion.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Settings {
    /// Wrap width in characters for generated markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_textwrap: Option<i64>,

    /// Shell command used to open files in an editor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_command: Option<String>,

    /// Last validation error text when the settings were force-loaded
    /// despite being invalid. Never persisted.
    #[serde(skip)]
    pub invalid_warning: Option<String>,
}

/// Raw field values handed to the settings lifecycle operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsValues {
    pub markdown_textwrap: Option<i64>,
    pub editor_command: Option<String>,
}

impl SettingsValues {
    /// Extract the known fields from a parsed JSON object, reporting type
    /// mismatches as field errors instead of failing. Unknown keys and
    /// explicit nulls are ignored, matching the stored-file contract.
    pub(crate) fn from_json(
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> (Self, Vec<FieldError>) {
        use serde_json::Value;

        let mut values = SettingsValues::default();
        let mut errors = Vec::new();

        match object.get("markdown_textwrap") {
            None | Some(Value::Null) => {}
            Some(Value::Number(n)) => match n.as_i64() {
                Some(width) => values.markdown_textwrap = Some(width),
                None => errors.push(FieldError {
                    field: "markdown_textwrap",
                    reason: format!("must be an integer, got {}", n),
                }),
            },
            Some(other) => errors.push(FieldError {
                field: "markdown_textwrap",
                reason: format!("must be an integer, got {}", json_type_name(other)),
            }),
        }

        match object.get("editor_command") {
            None | Some(Value::Null) => {}
            Some(Value::String(command)) => values.editor_command = Some(command.clone()),
            Some(other) => errors.push(FieldError {
                field: "editor_command",
                reason: format!("must be a string, got {}", json_type_name(other)),
            }),
        }

        (values, errors)
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

/// All field-level validation failures for one settings instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.reason))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Settings {
    /// Construct settings from raw field values.
    ///
    /// When `strict` is true, any validation failure is an error. Otherwise
    /// the instance is constructed anyway and the rendered failure text is
    /// recorded in `invalid_warning`, so repair commands can still operate
    /// on an invalid configuration.
    pub fn init(values: SettingsValues, strict: bool) -> SettingsResult<Self> {
        Self::init_checked(values, Vec::new(), strict)
    }

    /// Construction entry point for values read from a file.
    ///
    /// `field_errors` carries type-coercion failures; they count against
    /// the same strict/permissive decision as schema validation, so a
    /// wrong-typed stored field surfaces as `invalid_warning` permissively
    /// and as `SettingsError::Invalid` strictly.
    pub(crate) fn init_checked(
        values: SettingsValues,
        field_errors: Vec<FieldError>,
        strict: bool,
    ) -> SettingsResult<Self> {
        tracing::debug!("Validating settings");
        let settings = Settings {
            markdown_textwrap: values.markdown_textwrap,
            editor_command: values.editor_command,
            invalid_warning: None,
        };
        let mut errors = field_errors;
        if let Err(more) = settings.validate() {
            for error in more.0 {
                // A field that failed coercion is already reported
                if !errors.iter().any(|e| e.field == error.field) {
                    errors.push(error);
                }
            }
        }
        if errors.is_empty() {
            Ok(settings)
        } else if strict {
            Err(SettingsError::Invalid(ValidationErrors(errors)))
        } else {
            Ok(Settings {
                invalid_warning: Some(ValidationErrors(errors).to_string()),
                ..settings
            })
        }
    }

    /// Merge `values` over the explicitly-set fields of `self` and validate
    /// strictly. Returns a new instance; `self` is untouched.
    pub fn update(&self, values: SettingsValues) -> SettingsResult<Self> {
        tracing::debug!("Updating settings");
        let merged = SettingsValues {
            markdown_textwrap: values.markdown_textwrap.or(self.markdown_textwrap),
            editor_command: values
                .editor_command
                .or_else(|| self.editor_command.clone()),
        };
        Self::init(merged, true)
    }

    /// Clear the named fields and validate strictly. Unknown keys are
    /// silently ignored. An unset field stays unset; it is not re-filled
    /// from the environment.
    pub fn unset(&self, keys: &[&str]) -> SettingsResult<Self> {
        tracing::debug!("Unsetting settings");
        let mut values = SettingsValues {
            markdown_textwrap: self.markdown_textwrap,
            editor_command: self.editor_command.clone(),
        };
        for key in keys {
            match *key {
                "markdown_textwrap" => values.markdown_textwrap = None,
                "editor_command" => values.editor_command = None,
                _ => {}
            }
        }
        Self::init(values, true)
    }

    /// Validate the settings against the schema.
    ///
    /// Collects every field-level failure instead of stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if let Some(width) = self.markdown_textwrap {
            if width <= 0 {
                errors.push(FieldError {
                    field: "markdown_textwrap",
                    reason: format!("must be a positive integer, got {}", width),
                });
            }
        }

        match &self.editor_command {
            Some(command) if command.trim().is_empty() => errors.push(FieldError {
                field: "editor_command",
                reason: "must be a non-empty command".to_string(),
            }),
            Some(_) => {}
            None => {
                if editor_from_env().is_none() {
                    errors.push(FieldError {
                        field: "editor_command",
                        reason: format!(
                            "couldn't load an editor from ${}; please set it explicitly",
                            EDITOR_ENV
                        ),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Effective editor command: the configured value, falling back to the
    /// environment.
    pub fn editor(&self) -> Option<String> {
        self.editor_command.clone().or_else(editor_from_env)
    }

    /// Human-readable ordered listing of the fields, with the validation
    /// warning appended as a distinct line when set.
    pub fn render(&self) -> String {
        let fields: [(&str, Option<String>); 2] = [
            (
                "markdown-textwrap",
                self.markdown_textwrap.map(|w| w.to_string()),
            ),
            ("editor-command", self.editor()),
        ];
        let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let mut lines: Vec<String> = fields
            .iter()
            .map(|(name, value)| {
                format!(
                    "{:<width$} -> {}",
                    name,
                    value.as_deref().unwrap_or("<unset>"),
                    width = width
                )
            })
            .collect();
        if let Some(warning) = &self.invalid_warning {
            lines.push(String::new());
            lines.push(format!("Configuration is invalid: {}", warning));
        }
        lines.join("\n")
    }
}

/// Editor fallback from $EDITOR; empty values count as unset
fn editor_from_env() -> Option<String> {
    env::var(EDITOR_ENV).ok().filter(|v| !v.trim().is_empty())
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn values(wrap: Option<i64>, editor: Option<&str>) -> SettingsValues {
        SettingsValues {
            markdown_textwrap: wrap,
            editor_command: editor.map(String::from),
        }
    }

    #[test]
    fn test_init_strict_with_full_values() {
        let settings = Settings::init(values(Some(80), Some("vim")), true).unwrap();
        assert_eq!(settings.markdown_textwrap, Some(80));
        assert_eq!(settings.editor_command.as_deref(), Some("vim"));
        assert!(settings.invalid_warning.is_none());
    }

    #[test]
    fn test_init_strict_rejects_zero_wrap() {
        let result = Settings::init(values(Some(0), Some("vim")), true);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_init_strict_rejects_negative_wrap() {
        let result = Settings::init(values(Some(-4), Some("vim")), true);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_init_strict_rejects_blank_editor() {
        let result = Settings::init(values(None, Some("  ")), true);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn test_init_strict_requires_editor_fallback() {
        env::remove_var(EDITOR_ENV);
        let result = Settings::init(values(None, None), true);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn test_init_strict_resolves_editor_from_env() {
        env::set_var(EDITOR_ENV, "nano");
        let settings = Settings::init(values(None, None), true).unwrap();
        // Resolvability is checked; the field itself stays unset
        assert_eq!(settings.editor_command, None);
        assert_eq!(settings.editor().as_deref(), Some("nano"));
        env::remove_var(EDITOR_ENV);
    }

    #[test]
    #[serial]
    fn test_init_permissive_records_warning() {
        env::remove_var(EDITOR_ENV);
        let settings = Settings::init(values(Some(0), None), false).unwrap();
        let warning = settings.invalid_warning.as_deref().unwrap();
        assert!(warning.contains("markdown_textwrap"));
        assert!(warning.contains("editor_command"));
    }

    #[test]
    fn test_update_preserves_other_fields() {
        let current = Settings::init(values(Some(100), Some("vi")), true).unwrap();
        let updated = current.update(values(None, Some("vim"))).unwrap();
        assert_eq!(updated.markdown_textwrap, Some(100));
        assert_eq!(updated.editor_command.as_deref(), Some("vim"));
        // Functional update: the input is untouched
        assert_eq!(current.editor_command.as_deref(), Some("vi"));
    }

    #[test]
    fn test_update_rejects_invalid_merge() {
        let current = Settings::init(values(None, Some("vim")), true).unwrap();
        let result = current.update(values(Some(-1), None));
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_update_repairs_invalid_settings() {
        let broken = Settings::init(values(Some(0), Some("vim")), false).unwrap();
        assert!(broken.invalid_warning.is_some());

        let repaired = broken.update(values(Some(72), None)).unwrap();
        assert_eq!(repaired.markdown_textwrap, Some(72));
        assert!(repaired.invalid_warning.is_none());
    }

    #[test]
    fn test_unset_drops_field() {
        let current = Settings::init(values(Some(80), Some("vim")), true).unwrap();
        let result = current.unset(&["markdown_textwrap"]).unwrap();
        assert_eq!(result.markdown_textwrap, None);
        assert_eq!(result.editor_command.as_deref(), Some("vim"));
    }

    #[test]
    fn test_unset_ignores_unknown_keys() {
        let current = Settings::init(values(Some(80), Some("vim")), true).unwrap();
        let result = current.unset(&["no_such_key"]).unwrap();
        assert_eq!(result, current);
    }

    #[test]
    #[serial]
    fn test_unset_editor_without_fallback_fails() {
        env::remove_var(EDITOR_ENV);
        let current = Settings::init(values(None, Some("vim")), true).unwrap();
        let result = current.unset(&["editor_command"]);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn test_unset_editor_with_fallback_drops_field() {
        env::set_var(EDITOR_ENV, "nano");
        let current = Settings::init(values(None, Some("vim")), true).unwrap();
        let result = current.unset(&["editor_command"]).unwrap();
        assert_eq!(result.editor_command, None);
        env::remove_var(EDITOR_ENV);
    }

    #[test]
    fn test_from_json_reports_type_mismatches() {
        let object = serde_json::json!({
            "markdown_textwrap": "eighty",
            "editor_command": 3,
        });
        let (values, errors) = SettingsValues::from_json(object.as_object().unwrap());
        assert_eq!(values, SettingsValues::default());
        assert_eq!(errors.len(), 2);
        assert!(errors[0].reason.contains("integer"));
        assert!(errors[1].reason.contains("string"));
    }

    #[test]
    fn test_from_json_ignores_nulls_and_unknown_keys() {
        let object = serde_json::json!({
            "markdown_textwrap": null,
            "editor_command": "vim",
            "mystery": true,
        });
        let (values, errors) = SettingsValues::from_json(object.as_object().unwrap());
        assert!(errors.is_empty());
        assert_eq!(values.markdown_textwrap, None);
        assert_eq!(values.editor_command.as_deref(), Some("vim"));
    }

    #[test]
    fn test_from_json_rejects_fractional_width() {
        let object = serde_json::json!({
            "markdown_textwrap": 80.5,
            "editor_command": "vim",
        });
        let (_, errors) = SettingsValues::from_json(object.as_object().unwrap());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].reason.contains("80.5"));
    }

    #[test]
    #[serial]
    fn test_coercion_failure_not_double_reported() {
        env::remove_var(EDITOR_ENV);
        let object = serde_json::json!({ "editor_command": 3 });
        let (values, errors) = SettingsValues::from_json(object.as_object().unwrap());

        let settings = Settings::init_checked(values, errors, false).unwrap();
        let warning = settings.invalid_warning.unwrap();
        assert_eq!(warning.matches("editor_command").count(), 1);
    }

    #[test]
    fn test_init_checked_strict_fails_on_coercion_errors() {
        let object = serde_json::json!({
            "markdown_textwrap": "eighty",
            "editor_command": "vim",
        });
        let (values, errors) = SettingsValues::from_json(object.as_object().unwrap());
        let result = Settings::init_checked(values, errors, true);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_validation_collects_all_failures() {
        let settings = Settings {
            markdown_textwrap: Some(-1),
            editor_command: Some(String::new()),
            invalid_warning: None,
        };
        let errors = settings.validate().unwrap_err();
        assert_eq!(errors.0.len(), 2);
    }

    #[test]
    fn test_render_lists_fields_in_order() {
        let settings = Settings::init(values(Some(80), Some("vim")), true).unwrap();
        let rendered = settings.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("markdown-textwrap"));
        assert!(lines[0].ends_with("-> 80"));
        assert!(lines[1].starts_with("editor-command"));
        assert!(lines[1].ends_with("-> vim"));
    }

    #[test]
    fn test_render_appends_warning_line() {
        let settings = Settings {
            markdown_textwrap: Some(0),
            editor_command: Some("vim".to_string()),
            invalid_warning: Some("markdown_textwrap: must be a positive integer".to_string()),
        };
        let rendered = settings.render();
        assert!(rendered.contains("Configuration is invalid:"));
        // The warning is a separate trailing section, not a field row
        assert!(!rendered.lines().next().unwrap().contains("invalid"));
    }

    #[test]
    fn test_invalid_warning_is_never_serialized() {
        let settings = Settings {
            markdown_textwrap: Some(80),
            editor_command: Some("vim".to_string()),
            invalid_warning: Some("some warning".to_string()),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("invalid_warning"));
        assert!(!json.contains("some warning"));
    }
}
