use wireprims_codec::WireBuffer;

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let buffer = WireBuffer::encode(&args.values).map_err(|err| codec_error("encode failed", err))?;
    print_encoded(buffer.as_bytes(), format);
    Ok(SUCCESS)
}
