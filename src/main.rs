use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gapi_rest::config::Config;
use gapi_rest::gcp::client::GcpClient;
use gapi_rest::gcp::http::{format_api_error, DEFAULT_USER_AGENT};
use gapi_rest::resource::{
    fetch_all_pages_raw, get_registry, InvocationArgs, MethodDescriptor, ParamValue, Registry,
    ResourceInvoker, ServiceDef,
};
use gapi_rest::{opt_params, VERSION};
use indexmap::IndexMap;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Call Google REST APIs from their descriptor tables
#[derive(Parser, Debug)]
#[command(name = "gapi-rest", version = VERSION, about, long_about = None)]
struct Args {
    /// Project used for methods taking a `projectId`
    #[arg(long, global = true)]
    project: Option<String>,

    /// Send every request to this root URL instead of the service's own
    #[arg(long, global = true)]
    root_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known services
    Services,
    /// Print the descriptors of a service, resource or method
    Describe {
        service: String,
        resource: Option<String>,
        method: Option<String>,
    },
    /// Invoke a method and print the JSON response
    Call {
        service: String,
        resource: String,
        method: String,
        /// Parameter as name=value; repeat a name to send a list
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Request body as a JSON file, or `-` for stdin
        #[arg(long)]
        body: Option<String>,
        /// Follow page tokens and print every page
        #[arg(long)]
        all_pages: bool,
    },
    /// Show or update the configuration file
    Config {
        /// Save a default project
        #[arg(long)]
        set_project: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = level.as_filter()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // RUST_LOG refines the level when set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("gapi-rest {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("gapi-rest").join("gapi-rest.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".gapi-rest").join("gapi-rest.log");
    }
    PathBuf::from("gapi-rest.log")
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

/// Embedded tables plus any configured extra tables
fn load_registry(config: &Config) -> Registry {
    let mut registry = get_registry().clone();
    for path in &config.descriptor_files {
        match registry.load_file(path) {
            Ok(service) => tracing::info!("Loaded service '{}' from {:?}", service.name, path),
            Err(e) => {
                tracing::warn!("Skipping service table {:?}: {:#}", path, e);
                eprintln!("Warning: skipping {}: {:#}", path.display(), e);
            }
        }
    }
    registry
}

/// Group `name=value` pairs; a repeated name becomes a list
fn build_args(params: &[(String, String)], body: Option<Value>) -> Result<InvocationArgs> {
    let mut grouped: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (name, value) in params {
        grouped.entry(name.as_str()).or_default().push(value.clone());
    }

    let mut args = InvocationArgs::new();
    for (name, mut values) in grouped {
        let value = if values.len() == 1 {
            ParamValue::String(values.remove(0))
        } else {
            ParamValue::List(values)
        };
        args.insert(name, value);
    }

    if let Some(body) = body {
        args = args.with_body(&body)?;
    }
    Ok(args)
}

fn read_body(source: &str) -> Result<Value> {
    let content = if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read body from stdin")?;
        content
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read body file {}", source))?
    };
    serde_json::from_str(&content).context("Request body is not valid JSON")
}

fn print_services(registry: &Registry) {
    for service in registry.services() {
        println!(
            "{:<18} {:<6} {:>3} methods  {}",
            service.name,
            service.version,
            service.method_count(),
            service.base_url()
        );
    }
}

fn describe(registry: &Registry, service: &str, resource: Option<&str>, method: Option<&str>) -> Result<()> {
    let Some(service_def) = registry.get(service) else {
        bail!("unknown service: {}", service);
    };

    let output = match (resource, method) {
        (None, _) => serde_yaml::to_string(service_def)?,
        (Some(resource), None) => {
            let resource_def = service_def
                .resource(resource)
                .with_context(|| format!("unknown resource: {}.{}", service, resource))?;
            serde_yaml::to_string(resource_def)?
        }
        (Some(resource), Some(method)) => {
            let descriptor = service_def.require_method(resource, method)?;
            serde_yaml::to_string(descriptor)?
        }
    };
    print!("{}", output);
    Ok(())
}

/// Fill in `projectId` from the effective project when the method takes one
fn with_project(mut args: InvocationArgs, descriptor: &MethodDescriptor, project: Option<String>) -> InvocationArgs {
    if descriptor.parameters.contains_key("projectId") && !args.contains("projectId") {
        if let Some(project) = project {
            args.insert("projectId", project);
        }
    }
    args
}

async fn call(
    invoker: &ResourceInvoker<GcpClient>,
    service: &ServiceDef,
    descriptor: &MethodDescriptor,
    args: InvocationArgs,
    all_pages: bool,
) -> gapi_rest::Result<Option<Value>> {
    if all_pages {
        let pages = fetch_all_pages_raw(invoker, service, descriptor, args).await?;
        return Ok(Some(Value::Array(pages)));
    }
    invoker.invoke_raw(service, descriptor, args).await
}

/// Print a call's result; `false` when the call failed
fn print_outcome(label: &str, outcome: gapi_rest::Result<Option<Value>>) -> Result<bool> {
    match outcome {
        Ok(Some(value)) => println!("{}", serde_json::to_string_pretty(&value)?),
        Ok(None) => {},
        Err(e) => {
            tracing::error!("{} failed: {}", label, e);
            eprintln!("Error: {}", format_api_error(&e));
            return Ok(false);
        }
    }
    Ok(true)
}

// The log guard flushes on drop, so failures return an exit code
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let mut config = Config::load();
    let registry = load_registry(&config);

    match args.command {
        Command::Services => print_services(&registry),
        Command::Describe {
            service,
            resource,
            method,
        } => describe(&registry, &service, resource.as_deref(), method.as_deref())?,
        Command::Config { set_project } => {
            if let Some(project) = set_project {
                config.set_project(&project)?;
            }
            if let Some(path) = Config::config_path() {
                println!("# {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Call {
            service,
            resource,
            method,
            params,
            body,
            all_pages,
        } => {
            let (service_def, descriptor) = registry.method(&service, &resource, &method)?;

            let body = body.as_deref().map(read_body).transpose()?;
            let project = config.effective_project(args.project.as_deref());
            let call_args = with_project(build_args(&params, body)?, descriptor, project);

            let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
            let client = GcpClient::with_options(user_agent, config.timeout()).await?;

            let mut invoker = ResourceInvoker::new(client);
            if let Some(root_url) = config.effective_root_url(args.root_url.as_deref()) {
                tracing::info!("Using root URL override: {}", root_url);
                invoker = invoker.with_root_url(root_url);
            }
            if let Some(quota_user) = config.quota_user.as_deref() {
                invoker = invoker.with_default_params(opt_params! { "quotaUser" => quota_user });
            }

            let label = format!("{}.{}.{}", service, resource, method);
            let outcome = call(&invoker, service_def, descriptor, call_args, all_pages).await;
            if !print_outcome(&label, outcome)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gapi_rest::resource::{HttpMethod, ParameterSpec, ValueType};

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("q=title contains 'a=b'").unwrap(),
            ("q".to_string(), "title contains 'a=b'".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_repeated_names_become_lists() {
        let params = vec![
            ("calendarId".to_string(), "primary".to_string()),
            ("privateExtendedProperty".to_string(), "a=1".to_string()),
            ("privateExtendedProperty".to_string(), "b=2".to_string()),
        ];
        let args = build_args(&params, None).unwrap();
        assert_eq!(args.get("calendarId"), Some(&ParamValue::String("primary".to_string())));
        assert_eq!(
            args.get("privateExtendedProperty"),
            Some(&ParamValue::List(vec!["a=1".to_string(), "b=2".to_string()]))
        );
    }

    #[test]
    fn test_project_fills_only_missing_project_id() {
        let descriptor = MethodDescriptor::new(HttpMethod::Get, "v1/projects/{projectId}/traces")
            .param("projectId", ParameterSpec::path())
            .param("pageSize", ParameterSpec::query(ValueType::Integer));

        let args = with_project(InvocationArgs::new(), &descriptor, Some("my-project".to_string()));
        assert_eq!(args.get("projectId"), Some(&ParamValue::String("my-project".to_string())));

        let args = with_project(
            InvocationArgs::new().with("projectId", "explicit"),
            &descriptor,
            Some("my-project".to_string()),
        );
        assert_eq!(args.get("projectId"), Some(&ParamValue::String("explicit".to_string())));

        let other = MethodDescriptor::new(HttpMethod::Get, "colors");
        assert!(with_project(InvocationArgs::new(), &other, Some("p".to_string())).is_empty());
    }

    #[test]
    fn test_failed_call_is_reported_not_exited() {
        let err = gapi_rest::InvokeError::Transport {
            status: Some(404),
            body: String::new(),
        };
        assert!(!print_outcome("calendar.events.get", Err(err)).unwrap());
        assert!(print_outcome("calendar.events.delete", Ok(None)).unwrap());
        assert!(print_outcome("calendar.colors.get", Ok(Some(serde_json::json!({"kind": "calendar#colors"})))).unwrap());
    }
}
