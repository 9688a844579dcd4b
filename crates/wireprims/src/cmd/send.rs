use wireprims_codec::{WireBuffer, WireKind, WireValue};
use wireprims_transport::{connect_with_config, ConnectConfig, Connection, Result, WireStream};

use crate::cmd::values::parse_duration;
use crate::cmd::SendArgs;
use crate::exit::{codec_error, transport_error, CliResult, SUCCESS};
use crate::output::{print_values, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let config = build_config(&args)?;
    let buffer = WireBuffer::encode(&args.values).map_err(|err| codec_error("encode failed", err))?;

    let mut conn = connect_with_config(&args.host, args.port, &config)
        .map_err(|err| transport_error("connect failed", err))?;
    tracing::info!(
        host = %args.host,
        port = args.port,
        peer = ?conn.peer_addr(),
        "connected"
    );

    if buffer.capacity() > 0 {
        conn.send_buffer(&buffer, buffer.capacity())
            .map_err(|err| transport_error("send failed", err))?;
        tracing::info!(values = args.values.len(), bytes = buffer.capacity(), "sent");
    }

    let replies = read_replies(&mut conn, &args.expect)
        .map_err(|err| transport_error("receive failed", err))?;
    conn.disconnect()
        .map_err(|err| transport_error("disconnect failed", err))?;

    if !args.expect.is_empty() {
        print_values(&replies, format);
    }
    Ok(SUCCESS)
}

fn build_config(args: &SendArgs) -> CliResult<ConnectConfig> {
    let mut config = ConnectConfig::default().with_nodelay(args.nodelay);
    if let Some(raw) = &args.connect_timeout {
        config = config.with_connect_timeout(parse_duration(raw)?);
    }
    if let Some(raw) = &args.io_timeout {
        config = config.with_io_timeout(parse_duration(raw)?);
    }
    Ok(config)
}

fn read_replies<S: WireStream>(
    conn: &mut Connection<S>,
    kinds: &[WireKind],
) -> Result<Vec<WireValue>> {
    kinds.iter().map(|kind| conn.read_value(*kind)).collect()
}

#[cfg(all(test, unix))]
mod tests {
    use std::io::Write;
    use std::os::unix::net::UnixStream;

    use super::*;

    #[test]
    fn read_replies_in_requested_order() {
        let (client, mut server) = UnixStream::pair().unwrap();
        server.write_all(&7i32.to_be_bytes()).unwrap();
        server.write_all(&[0x00, 0x02, b'h', b'i']).unwrap();

        let mut conn = Connection::from_stream(client).unwrap();
        let replies = read_replies(&mut conn, &[WireKind::Int32, WireKind::String]).unwrap();
        assert_eq!(
            replies,
            vec![WireValue::Int32(7), WireValue::String("hi".into())]
        );
    }

    #[test]
    fn read_replies_stops_at_first_failure() {
        let (client, mut server) = UnixStream::pair().unwrap();
        server.write_all(&[0x01]).unwrap();
        drop(server);

        let mut conn = Connection::from_stream(client).unwrap();
        let err = read_replies(&mut conn, &[WireKind::Byte, WireKind::Int64]).unwrap_err();
        assert!(matches!(
            err,
            wireprims_transport::TransportError::ConnectionClosed { expected: 8, .. }
        ));
        assert!(!conn.is_connected());
    }
}
