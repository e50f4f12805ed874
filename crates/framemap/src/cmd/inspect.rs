use std::fs;

use framemap::IndexSnapshot;

use crate::cmd::InspectArgs;
use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, FAILURE, SUCCESS};
use crate::output::{print_record, print_snapshot, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let json = fs::read_to_string(&args.index)
        .map_err(|err| io_error(&format!("failed reading {}", args.index.display()), err))?;
    let snapshot: IndexSnapshot = serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            DATA_INVALID,
            format!("{} is not a valid index snapshot: {err}", args.index.display()),
        )
    })?;

    if let Some(filename) = &args.filename {
        let record = snapshot.by_filename.get(filename).ok_or_else(|| {
            CliError::new(
                FAILURE,
                format!("no record for {} in the snapshot", filename.display()),
            )
        })?;
        print_record(record, format);
        return Ok(SUCCESS);
    }

    if let Some(channel) = &args.channel {
        let slice = snapshot.channels.get(channel).ok_or_else(|| {
            CliError::new(FAILURE, format!("no channel {channel:?} in the snapshot"))
        })?;
        for record in &slice.history {
            print_record(record, format);
        }
        return Ok(SUCCESS);
    }

    print_snapshot(&snapshot, format);
    Ok(SUCCESS)
}
