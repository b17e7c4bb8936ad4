use command_dispatch_core::{Argument, ArgumentReader, Bundling, SegmentReader, parse};
use command_dispatch_mapper::{
    ArgumentField, ArgumentMapper, ArgumentSchema, Coercion, CommandArguments, MappingError,
    ValueParsers,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct FooArguments {
    foo: String,
}

impl CommandArguments for FooArguments {
    fn schema() -> ArgumentSchema<Self> {
        ArgumentSchema::new().field(ArgumentField::value("Foo", |a: &mut Self, v: String| a.foo = v))
    }
}

#[derive(Debug, PartialEq)]
enum Level {
    Low,
    High,
}

impl TryFrom<&str> for Level {
    type Error = ();

    fn try_from(text: &str) -> Result<Self, ()> {
        match text {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct JobArguments {
    name: String,
    retries: u8,
    verbose: bool,
    deadline: Option<u64>,
    level: Option<Level>,
    owner: Option<Uuid>,
}

impl CommandArguments for JobArguments {
    fn schema() -> ArgumentSchema<Self> {
        ArgumentSchema::new()
            .field(ArgumentField::value("Name", |a: &mut Self, v: String| a.name = v).short('N'))
            .field(ArgumentField::value("Retries", |a: &mut Self, v| a.retries = v).short('r'))
            .field(ArgumentField::flag("Verbose", |a: &mut Self, v| a.verbose = v).short('v').optional())
            .field(ArgumentField::nullable("Deadline", |a: &mut Self, v| a.deadline = v).optional())
            .field(
                ArgumentField::nullable_with_coercion(
                    "Level",
                    Coercion::new().try_from_text(),
                    |a: &mut Self, v| a.level = v,
                )
                .optional(),
            )
            .field(ArgumentField::nullable("Owner", |a: &mut Self, v| a.owner = v).optional())
    }
}

fn read(raw: &str, bundling: Bundling) -> Vec<Argument> {
    let segments = SegmentReader::new().read_all(raw).unwrap();
    ArgumentReader::with_bundling(bundling)
        .read_all(&segments)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[test]
fn test_quoted_value_is_unwrapped() {
    let arguments = read(r#"-foo "bar baz""#, Bundling::Never);
    assert_eq!(arguments, vec![Argument::long("foo", "bar baz")]);
}

#[test]
fn test_consecutive_flags_have_empty_values() {
    let arguments = read("-foo -bar", Bundling::Never);
    assert_eq!(
        arguments,
        vec![Argument::long("foo", ""), Argument::long("bar", "")]
    );
}

#[test]
fn test_schema_aware_reading_then_mapping() {
    let long_names = JobArguments::schema()
        .long_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let arguments = read(
        "-name nightly -vr 3",
        Bundling::unless_declared(long_names),
    );

    let job: JobArguments = ArgumentMapper::default().map_new(&arguments).unwrap();
    assert_eq!(job.name, "nightly");
    assert_eq!(job.retries, 3);
    assert!(job.verbose);
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

#[test]
fn test_optional_fields_default() {
    let parsed = parse("job --name nightly --retries 1").unwrap().unwrap();
    let job: JobArguments = ArgumentMapper::default().map_new(&parsed.arguments).unwrap();

    assert!(!job.verbose);
    assert_eq!(job.deadline, None);
    assert_eq!(job.level, None);
    assert_eq!(job.owner, None);
}

#[test]
fn test_every_conversion_path() {
    let parsed = parse(
        "job -N nightly -r 2 --deadline 1700000000 --level high \
         --owner 67e55044-10b1-426f-9247-bb680e5fe0c8 --verbose false",
    )
    .unwrap()
    .unwrap();
    let job: JobArguments = ArgumentMapper::default().map_new(&parsed.arguments).unwrap();

    assert_eq!(job.name, "nightly");
    assert_eq!(job.retries, 2);
    assert!(!job.verbose);
    assert_eq!(job.deadline, Some(1_700_000_000));
    assert_eq!(job.level, Some(Level::High));
    assert_eq!(
        job.owner,
        Some(Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap())
    );
}

#[test]
fn test_unknown_argument_is_named() {
    let arguments = vec![Argument::long("Foo", "x"), Argument::long("Bar", "y")];
    let err = ArgumentMapper::default()
        .map_new::<FooArguments>(&arguments)
        .unwrap_err();

    assert_eq!(
        err,
        MappingError::UnknownArguments {
            command: None,
            arguments: vec![Argument::long("Bar", "y")],
        }
    );
    assert!(err.to_string().contains("Bar"));
}

#[test]
fn test_conversion_failure_names_type() {
    let parsed = parse("job --name n --retries 300").unwrap().unwrap();
    let err = ArgumentMapper::default()
        .map_new::<JobArguments>(&parsed.arguments)
        .unwrap_err();
    assert_eq!(
        err,
        MappingError::UnsupportedConversion {
            value: "300".into(),
            target_type: "u8",
        }
    );
}

#[test]
fn test_try_from_fallback_rejects_unknown_level() {
    let parsed = parse("job --name n --retries 1 --level medium").unwrap().unwrap();
    let err = ArgumentMapper::default()
        .map_new::<JobArguments>(&parsed.arguments)
        .unwrap_err();
    assert!(matches!(err, MappingError::UnsupportedConversion { ref value, .. } if value == "medium"));
}

#[test]
fn test_registered_parser_overrides_from_str() {
    let parsers = ValueParsers::new().with::<u8>(|text: &str| match text {
        "many" => Some(10),
        other => other.parse().ok(),
    });
    let parsed = parse("job --name n --retries many").unwrap().unwrap();
    let job: JobArguments = ArgumentMapper::new(parsers)
        .map_new(&parsed.arguments)
        .unwrap();
    assert_eq!(job.retries, 10);
}
