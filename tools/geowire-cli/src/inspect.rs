//! Inspection commands - info, dump and check

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use geowire_core::{DecodeError, DecodeLimits, peek_version};

use crate::kind::EntityKind;

/// Result of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Readable,
    /// Written by a newer build
    Unsupported,
    /// Truncated or damaged
    Corrupt,
}

impl CheckOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            CheckOutcome::Readable => ExitCode::SUCCESS,
            CheckOutcome::Corrupt => ExitCode::from(1),
            CheckOutcome::Unsupported => ExitCode::from(2),
        }
    }
}

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Payload file
    pub file: PathBuf,
}

/// Arguments for the dump and check commands
#[derive(Args)]
pub struct DecodeArgs {
    /// Payload file
    pub file: PathBuf,

    /// Entity kind stored in the file
    #[arg(long, value_enum)]
    pub kind: EntityKind,
}

fn read_payload(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read payload: {}", path.display()))
}

/// Print the leading version tag and payload size
pub fn info(args: InfoArgs) -> Result<()> {
    let bytes = read_payload(&args.file)?;
    let version = peek_version(&bytes)
        .with_context(|| format!("No version tag in {}", args.file.display()))?;

    println!("File: {}", args.file.display());
    println!("Size: {} bytes", bytes.len());
    println!("Version tag: {}", version);
    Ok(())
}

/// Decode and print as JSON
pub fn dump(args: DecodeArgs, limits: DecodeLimits) -> Result<()> {
    let bytes = read_payload(&args.file)?;
    let json = args
        .kind
        .decode_json(&bytes, limits)
        .with_context(|| format!("Failed to decode {:?} from {}", args.kind, args.file.display()))?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Decode and report whether the payload is readable by this build
pub fn check(args: DecodeArgs, limits: DecodeLimits) -> Result<CheckOutcome> {
    let bytes = read_payload(&args.file)?;
    match args.kind.decode_json(&bytes, limits) {
        Ok(_) => {
            println!("OK: {} ({} bytes)", args.file.display(), bytes.len());
            Ok(CheckOutcome::Readable)
        }
        Err(err) => match err.downcast_ref::<DecodeError>() {
            Some(decode) if decode.is_unsupported_version() => {
                println!(
                    "UNSUPPORTED: {}: {} (this build reads {:?} up to v{})",
                    args.file.display(),
                    decode,
                    args.kind,
                    args.kind.supported_version()
                );
                Ok(CheckOutcome::Unsupported)
            }
            Some(decode) => {
                println!("CORRUPT: {}: {}", args.file.display(), decode);
                Ok(CheckOutcome::Corrupt)
            }
            None => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geowire_core::encode;
    use geowire_data::Location;

    fn payload(dir: &tempfile::TempDir, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join("payload.gw");
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn check_args(file: PathBuf) -> DecodeArgs {
        DecodeArgs {
            file,
            kind: EntityKind::Location,
        }
    }

    #[test]
    fn test_check_ok() {
        let dir = tempfile::tempdir().unwrap();
        let file = payload(&dir, &encode(&Location::new(1.0, 2.0)).unwrap());
        let code = check(check_args(file), DecodeLimits::default()).unwrap();
        assert_eq!(code, CheckOutcome::Readable);
    }

    #[test]
    fn test_check_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = encode(&Location::new(1.0, 2.0)).unwrap();
        bytes[..4].copy_from_slice(&9i32.to_be_bytes());
        let file = payload(&dir, &bytes);
        let code = check(check_args(file), DecodeLimits::default()).unwrap();
        assert_eq!(code, CheckOutcome::Unsupported);
    }

    #[test]
    fn test_check_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = encode(&Location::new(1.0, 2.0)).unwrap();
        let file = payload(&dir, &bytes[..bytes.len() - 2]);
        let code = check(check_args(file), DecodeLimits::default()).unwrap();
        assert_eq!(code, CheckOutcome::Corrupt);
    }

    #[test]
    fn test_info_requires_version_tag() {
        let dir = tempfile::tempdir().unwrap();
        let file = payload(&dir, &[0, 1]);
        assert!(info(InfoArgs { file }).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = dump(
            check_args(dir.path().join("missing.gw")),
            DecodeLimits::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read payload"));
    }
}
