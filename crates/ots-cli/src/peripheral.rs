//! Sample peripheral.
//!
//! The service lives on one event loop and handles peer events strictly one
//! at a time. A scripted peer runs on its own task and talks to the loop over
//! channels: requests go in on a bounded `mpsc` channel, replies and
//! indications come back on an unbounded one.

use bytes::Bytes;
use colored::Colorize;
use ots_protocol::{opcodes, AttError, CccValue, OlcpCodec, OlcpProcedure};
use ots_service::{IndicateError, IndicationSink, PooledTransfer, Service, ServiceConfig};
use ots_store::SlotPool;
use ots_types::{ObjectId, ObjectMetadata, ObjectProperties, ObjectSize, PeerId};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A request from the peer.
#[derive(Debug, Clone)]
pub enum PeerEvent {
    CccWrite(CccValue),
    OlcpWrite(Bytes),
    Read { offset: u32, len: u32 },
    ReadComplete,
    Write { offset: u32, data: Bytes },
}

/// Something the service sends back to the peer.
///
/// Every request gets exactly one reply that is not an
/// [`Outbound::Indication`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Indication(Bytes),
    WriteAccepted(usize),
    WriteRejected(AttError),
    Content(Bytes),
    Failed(String),
    Ack,
}

impl Outbound {
    fn is_reply(&self) -> bool {
        !matches!(self, Self::Indication(_))
    }
}

/// Indication sink that forwards to the peer's reply channel.
pub struct ChannelSink(mpsc::UnboundedSender<Outbound>);

impl IndicationSink for ChannelSink {
    fn indicate(&mut self, payload: Bytes) -> Result<(), IndicateError> {
        self.0
            .send(Outbound::Indication(payload))
            .map_err(|_| IndicateError("peer disconnected".into()))
    }
}

pub type Peripheral = Service<PooledTransfer, ChannelSink>;

/// Build the service and register the two sample objects.
pub fn build(config: &ServiceConfig, sink: ChannelSink) -> anyhow::Result<(Peripheral, ObjectId, ObjectId)> {
    let transfer = PooledTransfer::new(SlotPool::new(&config.pool), config.fragment_policy);
    let mut service = Service::new(config, transfer, sink);
    let props = ObjectProperties::READ | ObjectProperties::WRITE | ObjectProperties::PATCH;

    let first = service.add_object(
        PeerId::LOCAL,
        ObjectMetadata::new("first_object.txt", ObjectSize::full(100), props),
        Some(1),
    )?;
    let second = service.add_object(
        PeerId::LOCAL,
        ObjectMetadata::new("second_object.gif", ObjectSize::full(100), props),
        Some(2),
    )?;
    info!(%first, %second, "sample objects registered");
    Ok((service, first, second))
}

/// Apply one peer event and produce its reply.
pub fn handle(service: &mut Peripheral, peer: PeerId, event: PeerEvent) -> Outbound {
    debug!(%peer, ?event, "peer event");
    match event {
        PeerEvent::CccWrite(value) => {
            service.olcp_ccc_changed(value);
            Outbound::Ack
        }
        PeerEvent::OlcpWrite(data) => match service.olcp_write(peer, &data, 0) {
            Ok(len) => Outbound::WriteAccepted(len),
            Err(e) => Outbound::WriteRejected(e),
        },
        PeerEvent::Read { offset, len } => match service.read_current(peer, offset, len) {
            Ok(data) => Outbound::Content(Bytes::copy_from_slice(data)),
            Err(e) => Outbound::Failed(e.to_string()),
        },
        PeerEvent::ReadComplete => match service.finish_read(peer) {
            Ok(()) => Outbound::Ack,
            Err(e) => Outbound::Failed(e.to_string()),
        },
        PeerEvent::Write { offset, data } => {
            match service.write_current(peer, &data, offset, 0) {
                Ok(()) => Outbound::Ack,
                Err(e) => Outbound::Failed(e.to_string()),
            }
        }
    }
}

/// Event loop: handle events until the peer hangs up.
pub async fn serve(
    service: &mut Peripheral,
    peer: PeerId,
    mut events: mpsc::Receiver<PeerEvent>,
    replies: mpsc::UnboundedSender<Outbound>,
) {
    while let Some(event) = events.recv().await {
        let reply = handle(service, peer, event);
        if replies.send(reply).is_err() {
            break;
        }
    }
    info!(%peer, "peer disconnected");
}

/// The scripted peer's session: a description and the event for each step.
pub fn script(first: ObjectId, second: ObjectId) -> Vec<(String, PeerEvent)> {
    let olcp = |procedure: OlcpProcedure| PeerEvent::OlcpWrite(OlcpCodec::encode_request(&procedure));
    vec![
        ("enable indications".into(), PeerEvent::CccWrite(CccValue::INDICATE)),
        (format!("go to {first}"), olcp(OlcpProcedure::GoTo(first))),
        ("read 100 bytes".into(), PeerEvent::Read { offset: 0, len: 100 }),
        ("finish read".into(), PeerEvent::ReadComplete),
        (format!("next (expect {second})"), olcp(OlcpProcedure::Next)),
        ("read 100 bytes".into(), PeerEvent::Read { offset: 0, len: 100 }),
        ("next past the last object".into(), olcp(OlcpProcedure::Next)),
        ("malformed first".into(), PeerEvent::OlcpWrite(Bytes::from_static(&[opcodes::FIRST, 0x00]))),
        ("order by name".into(), olcp(OlcpProcedure::Order(0x01))),
        ("patch at offset 10".into(), PeerEvent::Write { offset: 10, data: Bytes::from_static(b"Hello") }),
        ("read back".into(), PeerEvent::Read { offset: 10, len: 5 }),
    ]
}

/// Run `steps` against the service, printing each reply. Returns everything
/// the service sent.
pub async fn scripted_peer(
    steps: Vec<(String, PeerEvent)>,
    events: mpsc::Sender<PeerEvent>,
    mut replies: mpsc::UnboundedReceiver<Outbound>,
) -> anyhow::Result<Vec<Outbound>> {
    let mut transcript = Vec::new();
    for (description, event) in steps {
        println!("{} {}", "→".bold(), description);
        events.send(event).await?;
        loop {
            let Some(reply) = replies.recv().await else {
                anyhow::bail!("service closed the connection");
            };
            println!("  {}", describe(&reply));
            let done = reply.is_reply();
            transcript.push(reply);
            if done {
                break;
            }
        }
    }
    Ok(transcript)
}

fn describe(reply: &Outbound) -> String {
    match reply {
        Outbound::Indication(bytes) => match OlcpCodec::decode_response(bytes) {
            Ok(resp) if resp.result.is_success() => {
                format!("indication: {:#04x} {}", resp.request_opcode, resp.result.to_string().green())
            }
            Ok(resp) => {
                format!("indication: {:#04x} {}", resp.request_opcode, resp.result.to_string().yellow())
            }
            Err(e) => format!("malformed indication: {e}").red().to_string(),
        },
        Outbound::WriteAccepted(len) => format!("write accepted ({len} bytes)").dimmed().to_string(),
        Outbound::WriteRejected(e) => {
            format!("rejected with ATT error {:#04x}: {e}", e.code()).red().to_string()
        }
        Outbound::Content(data) => format!("{} bytes: {}", data.len(), hex::encode(data).cyan()),
        Outbound::Failed(message) => format!("failed: {message}").red().to_string(),
        Outbound::Ack => "ok".green().to_string(),
    }
}

/// Build the peripheral and run the scripted session to completion.
pub async fn run_session(config: &ServiceConfig, conn: u16) -> anyhow::Result<Vec<Outbound>> {
    let (event_tx, event_rx) = mpsc::channel(16);
    let (reply_tx, reply_rx) = mpsc::unbounded_channel();
    let (mut service, first, second) = build(config, ChannelSink(reply_tx.clone()))?;
    let peer = PeerId::new(conn);

    let peer_task = tokio::spawn(scripted_peer(script(first, second), event_tx, reply_rx));
    serve(&mut service, peer, event_rx, reply_tx).await;
    peer_task.await?
}

pub async fn run(config: &ServiceConfig, conn: u16) -> anyhow::Result<()> {
    let transcript = run_session(config, conn).await?;
    println!(
        "{} session complete: {} messages from the service",
        "✓".green().bold(),
        transcript.len()
    );
    Ok(())
}
