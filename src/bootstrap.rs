// SPDX-License-Identifier: MIT
//!
//! Lambda entry point code generation
//!
//! [`BootstrapTemplate::render`] emits the source of a wrapper type for one
//! Lambda function. The emitted code calls back into
//! [`set_execution_environment`] and [`build_service_provider`].
//!
use crate::error::{HostingError, Result};
use crate::services::{FromServices, ServiceCollection, ServiceProvider};
use std::fmt::Write as _;

/// Environment variable the Lambda runtime uses to report the execution environment
pub const EXECUTION_ENV: &str = "AWS_EXECUTION_ENV";

/// Tag appended to [`EXECUTION_ENV`]
pub fn execution_environment_tag() -> String {
    format!("lib/{}#{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Append this library's tag to `AWS_EXECUTION_ENV`.
/// Calling it again leaves the variable unchanged.
pub fn set_execution_environment() {
    let tag = execution_environment_tag();
    let current = std::env::var(EXECUTION_ENV).unwrap_or_default();
    if current.split('_').any(|part| part == tag) {
        return;
    }
    let value = if current.is_empty() {
        tag
    } else {
        format!("{}_{}", current, tag)
    };
    std::env::set_var(EXECUTION_ENV, value);
}

/// Container holding `T` as a singleton plus whatever `configure` registers
pub fn build_service_provider<T, F>(configure: F) -> ServiceProvider
where
    T: FromServices + Send + Sync + 'static,
    F: FnOnce(&mut ServiceCollection),
{
    let mut services = ServiceCollection::new();
    services.add_singleton_from_services::<T>();
    configure(&mut services);
    services.build()
}

/// Input of the entry point generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapTemplate {
    /// Path of the type declaring the Lambda function, e.g. `crate::Functions`
    pub lambda_type: String,
    /// Async method on `lambda_type` handling the event
    pub method: String,
    /// Type implementing `Startup`, used only with dependency injection
    pub startup_type: Option<String>,
    pub using_dependency_injection: bool,
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn is_type_path(s: &str) -> bool {
    !s.is_empty() && s.split("::").all(is_identifier)
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl BootstrapTemplate {
    pub fn new(lambda_type: &str, method: &str) -> Self {
        Self {
            lambda_type: lambda_type.to_string(),
            method: method.to_string(),
            startup_type: None,
            using_dependency_injection: false,
        }
    }

    pub fn with_dependency_injection(mut self, startup_type: Option<&str>) -> Self {
        self.using_dependency_injection = true;
        self.startup_type = startup_type.map(str::to_string);
        self
    }

    /// Name of the emitted wrapper type
    pub fn generated_type_name(&self) -> String {
        format!("{}_{}_Generated", last_segment(&self.lambda_type), self.method)
    }

    fn validate(&self) -> Result<()> {
        if !is_type_path(&self.lambda_type) {
            return Err(HostingError::Template(format!(
                "lambda type {:?} is not a type path",
                self.lambda_type
            )));
        }
        if !is_identifier(&self.method) {
            return Err(HostingError::Template(format!(
                "method {:?} is not an identifier",
                self.method
            )));
        }
        if let Some(startup) = &self.startup_type {
            if !is_type_path(startup) {
                return Err(HostingError::Template(format!(
                    "startup type {:?} is not a type path",
                    startup
                )));
            }
        }
        Ok(())
    }

    /// Generated Rust source
    pub fn render(&self) -> Result<String> {
        self.validate()?;
        let mut out = String::new();
        self.write_source(&mut out)
            .map_err(|err| HostingError::Template(err.to_string()))?;
        Ok(out)
    }

    fn write_source(&self, out: &mut String) -> std::fmt::Result {
        let name = self.generated_type_name();
        let target = &self.lambda_type;
        let method = &self.method;
        let di = self.using_dependency_injection;

        writeln!(out, "// <auto-generated/>")?;
        writeln!(out, "use lambda_web_hosting::lambda_runtime::LambdaEvent;")?;
        writeln!(out, "use lambda_web_hosting::serde_json::Value;")?;
        writeln!(out, "use lambda_web_hosting::LambdaError;")?;
        if di {
            writeln!(
                out,
                "use lambda_web_hosting::bootstrap::{{build_service_provider, set_execution_environment}};"
            )?;
            writeln!(out, "use lambda_web_hosting::services::ServiceProvider;")?;
            if self.startup_type.is_some() {
                writeln!(out, "use lambda_web_hosting::services::Startup;")?;
            }
        } else {
            writeln!(out, "use lambda_web_hosting::bootstrap::set_execution_environment;")?;
        }

        // Wrapper type
        writeln!(out)?;
        writeln!(out, "#[allow(non_camel_case_types)]")?;
        writeln!(out, "pub struct {} {{", name)?;
        if di {
            writeln!(out, "    service_provider: ServiceProvider,")?;
        } else {
            writeln!(out, "    target: {},", target)?;
        }
        writeln!(out, "}}")?;

        // Constructor
        writeln!(out)?;
        writeln!(out, "impl {} {{", name)?;
        writeln!(out, "    pub fn new() -> Self {{")?;
        writeln!(out, "        set_execution_environment();")?;
        match (di, &self.startup_type) {
            (true, Some(startup)) => {
                writeln!(
                    out,
                    "        let service_provider = build_service_provider::<{}, _>(|services| {{",
                    target
                )?;
                writeln!(
                    out,
                    "            <{} as Default>::default().configure_services(services);",
                    startup
                )?;
                writeln!(out, "        }});")?;
                writeln!(out, "        Self {{ service_provider }}")?;
            }
            (true, None) => {
                writeln!(
                    out,
                    "        let service_provider = build_service_provider::<{}, _>(|_services| {{}});",
                    target
                )?;
                writeln!(out, "        Self {{ service_provider }}")?;
            }
            (false, _) => {
                writeln!(out, "        Self {{")?;
                writeln!(out, "            target: <{} as Default>::default(),", target)?;
                writeln!(out, "        }}")?;
            }
        }
        writeln!(out, "    }}")?;

        // Invocation
        writeln!(out)?;
        writeln!(
            out,
            "    pub async fn invoke(&self, event: LambdaEvent<Value>) -> Result<Value, LambdaError> {{"
        )?;
        if di {
            writeln!(
                out,
                "        let target = self.service_provider.required::<{}>()?;",
                target
            )?;
            writeln!(out, "        target.{}(event).await", method)?;
        } else {
            writeln!(out, "        self.target.{}(event).await", method)?;
        }
        writeln!(out, "    }}")?;
        writeln!(out, "}}")
    }
}
