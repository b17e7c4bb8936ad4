//! Demonstration commands registered by `dispatch-shell`.

use anyhow::{Context, bail};
use command_dispatch_engine::{
    Command, DispatchConfig, Dispatcher, FactoryResolver, RegistrationError,
};
use command_dispatch_mapper::{ArgumentField, ArgumentSchema, CommandArguments};
use thiserror::Error;
use uuid::Uuid;

/// Failures with a dedicated exit code.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("permission denied for {user}")]
    PermissionDenied { user: String },
    #[error("remote is offline")]
    Offline,
}

impl DemoError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PermissionDenied { .. } => 3,
            Self::Offline => 4,
        }
    }
}

/// Builds a dispatcher with every demonstration command registered.
pub fn dispatcher(config: DispatchConfig) -> Result<Dispatcher, RegistrationError> {
    let resolver = FactoryResolver::new()
        .with_default::<EchoCommand>()
        .with_default::<SumCommand>()
        .with_default::<RemoteAddCommand>()
        .with_default::<FailCommand>();

    let mut dispatcher = Dispatcher::new(resolver)
        .with_config(config)
        .on_error(DemoError::exit_code);
    dispatcher.register::<EchoCommand>()?;
    dispatcher.register::<SumCommand>()?;
    dispatcher.register_route::<RemoteAddCommand>("remote add")?;
    dispatcher.register::<FailCommand>()?;
    Ok(dispatcher)
}

#[derive(Debug, Default)]
pub struct EchoArguments {
    text: String,
    upper: bool,
    times: Option<u32>,
}

impl CommandArguments for EchoArguments {
    fn schema() -> ArgumentSchema<Self> {
        ArgumentSchema::new()
            .field(
                ArgumentField::value("Text", |a: &mut Self, v: String| a.text = v)
                    .short('t')
                    .description("text to print"),
            )
            .field(
                ArgumentField::flag("Upper", |a: &mut Self, v| a.upper = v)
                    .short('u')
                    .description("print in upper case"),
            )
            .field(
                ArgumentField::nullable("Times", |a: &mut Self, v| a.times = v)
                    .short('n')
                    .description("number of repetitions")
                    .optional(),
            )
    }
}

#[derive(Default)]
pub struct EchoCommand;

impl Command for EchoCommand {
    type Arguments = EchoArguments;
    const DESCRIPTION: Option<&'static str> = Some("Print text");

    fn execute(&mut self, arguments: EchoArguments) -> anyhow::Result<()> {
        let text = if arguments.upper {
            arguments.text.to_uppercase()
        } else {
            arguments.text
        };
        for _ in 0..arguments.times.unwrap_or(1) {
            println!("{text}");
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SumArguments {
    left: i64,
    right: i64,
}

impl CommandArguments for SumArguments {
    fn schema() -> ArgumentSchema<Self> {
        ArgumentSchema::new()
            .field(ArgumentField::value("Left", |a: &mut Self, v| a.left = v).short('l'))
            .field(ArgumentField::value("Right", |a: &mut Self, v| a.right = v).short('r'))
    }
}

#[derive(Default)]
pub struct SumCommand;

impl Command for SumCommand {
    type Arguments = SumArguments;
    const DESCRIPTION: Option<&'static str> = Some("Add two integers");

    fn execute(&mut self, arguments: SumArguments) -> anyhow::Result<()> {
        let total = arguments
            .left
            .checked_add(arguments.right)
            .context("sum overflows a 64-bit integer")?;
        println!("{total}");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RemoteAddArguments {
    name: String,
    url: String,
    id: Option<Uuid>,
}

impl CommandArguments for RemoteAddArguments {
    fn schema() -> ArgumentSchema<Self> {
        ArgumentSchema::new()
            .field(ArgumentField::value("Name", |a: &mut Self, v: String| a.name = v))
            .field(ArgumentField::value("Url", |a: &mut Self, v: String| a.url = v))
            .field(ArgumentField::nullable("Id", |a: &mut Self, v| a.id = v).optional())
    }
}

#[derive(Default)]
pub struct RemoteAddCommand;

impl Command for RemoteAddCommand {
    type Arguments = RemoteAddArguments;
    const NAME: Option<&'static str> = Some("remote-add");
    const DESCRIPTION: Option<&'static str> = Some("Register a named remote");

    fn execute(&mut self, arguments: RemoteAddArguments) -> anyhow::Result<()> {
        if !arguments.url.contains("://") {
            bail!("not a URL: {}", arguments.url);
        }
        match arguments.id {
            Some(id) => println!("added remote {} -> {} ({id})", arguments.name, arguments.url),
            None => println!("added remote {} -> {}", arguments.name, arguments.url),
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FailArguments {
    reason: String,
}

impl CommandArguments for FailArguments {
    fn schema() -> ArgumentSchema<Self> {
        ArgumentSchema::new().field(
            ArgumentField::value("Reason", |a: &mut Self, v: String| a.reason = v)
                .description("denied, offline or free text")
                .optional(),
        )
    }
}

#[derive(Default)]
pub struct FailCommand;

impl Command for FailCommand {
    type Arguments = FailArguments;
    const DESCRIPTION: Option<&'static str> = Some("Fail on purpose");

    fn execute(&mut self, arguments: FailArguments) -> anyhow::Result<()> {
        match arguments.reason.as_str() {
            "denied" => Err(DemoError::PermissionDenied {
                user: "guest".into(),
            })
            .context("running fail"),
            "offline" => Err(DemoError::Offline.into()),
            "" => bail!("failed without a reason"),
            reason => bail!("failed: {reason}"),
        }
    }
}
