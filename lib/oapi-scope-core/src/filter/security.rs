//! Removal of roles from the generated role-based security scheme.
//!
//! The backend framework generates a security scheme for role-restricted
//! endpoints, listing the roles in each operation requirement. It also declares a
//! basic authentication scheme with the same name, and basic authentication
//! accepts no scopes: the requirement must list none.

use crate::{Document, Operation, PathItem, Section};

impl Document {
    /// Returns a copy where every requirement on `scheme` lists no role.
    ///
    /// Every path item is processed, whatever audience it belongs to.
    /// Applying it twice gives the same document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oapi_scope_core::Document;
    /// use serde_json::json;
    ///
    /// let document = Document::try_from(json!({
    ///     "paths": {
    ///         "/internal/admin": {
    ///             "get": { "security": [{ "SecurityScheme": ["admin"] }] }
    ///         }
    ///     }
    /// }))?;
    ///
    /// let sanitized = serde_json::to_value(document.sanitize_security("SecurityScheme"))?;
    /// assert_eq!(
    ///     sanitized["paths"]["/internal/admin"]["get"]["security"],
    ///     json!([{ "SecurityScheme": [] }])
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn sanitize_security(&self, scheme: &str) -> Self {
        let sections = self
            .sections()
            .iter()
            .map(|section| match section {
                Section::Paths(paths) => Section::Paths(
                    paths
                        .iter()
                        .map(|(path, item)| (path.clone(), strip_scheme_roles(item, scheme)))
                        .collect(),
                ),
                other => other.clone(),
            })
            .collect();

        Self::new(sections)
    }
}

fn strip_scheme_roles(item: &PathItem, scheme: &str) -> PathItem {
    item.map_operations(|operation| {
        let mut operation = operation.clone();
        strip_operation_roles(&mut operation, scheme);
        operation
    })
}

fn strip_operation_roles(operation: &mut Operation, scheme: &str) {
    let Some(security) = operation.security.as_mut() else {
        return;
    };
    for requirement in security {
        if let Some(roles) = requirement.get_mut(scheme) {
            roles.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;
    use serde_json::json;

    use super::*;
    use crate::SecurityRequirement;

    fn secured(requirements: Vec<SecurityRequirement>) -> Operation {
        Operation::default().with_security(requirements)
    }

    #[test]
    fn should_empty_roles_of_target_scheme_only() {
        let mut operation = secured(vec![
            indexmap! { "SecurityScheme".to_string() => vec!["admin".to_string()] },
            indexmap! { "x-rh-identity".to_string() => vec!["read".to_string()] },
        ]);

        strip_operation_roles(&mut operation, "SecurityScheme");

        assert_eq!(
            operation.security,
            Some(vec![
                indexmap! { "SecurityScheme".to_string() => vec![] },
                indexmap! { "x-rh-identity".to_string() => vec!["read".to_string()] },
            ])
        );
    }

    #[test]
    fn should_leave_operations_without_security_untouched() {
        let mut operation = Operation::default();

        strip_operation_roles(&mut operation, "SecurityScheme");

        assert_eq!(operation, Operation::default());
    }

    #[test]
    fn should_be_idempotent() {
        let document = Document::try_from(json!({
            "paths": {
                "/api/integrations/v1.0/endpoints": {
                    "get": {
                        "security": [
                            { "SecurityScheme": ["admin", "user"], "x-rh-identity": [] }
                        ]
                    }
                }
            }
        }))
        .expect("valid document");

        let once = document.sanitize_security("SecurityScheme");
        let twice = once.sanitize_security("SecurityScheme");

        assert_eq!(once, twice);
        assert_ne!(once, document);
    }

    #[test]
    fn should_sanitize_paths_outside_any_audience() {
        let document = Document::try_from(json!({
            "openapi": "3.0.3",
            "paths": {
                "/legacy/endpoints": {
                    "summary": "Legacy endpoints",
                    "get": { "security": [{ "SecurityScheme": ["admin"] }] }
                }
            }
        }))
        .expect("valid document");

        let sanitized = serde_json::to_value(document.sanitize_security("SecurityScheme"))
            .expect("serializable");

        assert_eq!(
            sanitized,
            json!({
                "openapi": "3.0.3",
                "paths": {
                    "/legacy/endpoints": {
                        "summary": "Legacy endpoints",
                        "get": { "security": [{ "SecurityScheme": [] }] }
                    }
                }
            })
        );
    }
}
