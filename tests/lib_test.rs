//! Library integration tests.

use trellis::TrellisError;

#[test]
fn error_types_are_public() {
    let err = TrellisError::InvalidEnvironment {
        name: "foo".into(),
        valid: vec!["development".into(), "production".into()],
    };
    assert_eq!(
        err.to_string(),
        "foo is not a valid environment, valid options are development, production"
    );
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> trellis::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use trellis::cli::{Cli, Commands};

    let cli = Cli::parse_from(["trellis", "rollback", "--release=42", "production"]);

    if let Commands::Rollback(args) = cli.command {
        assert_eq!(args.release.as_deref(), Some("42"));
        assert_eq!(args.args, vec!["production"]);
    } else {
        panic!("Expected Rollback command");
    }
}

#[test]
fn argument_policy_is_public() {
    use trellis::cli::ArgumentPolicy;

    let policy = ArgumentPolicy::new(1, 1);
    assert_eq!(policy.max(), 2);
    assert!(policy.validate(&["development", "example.com"]).is_ok());
}
