use baclist_core::apdu::{ApduType, RejectPdu};
use baclist_core::encoding::reader::Reader;
use baclist_core::services::{ChangeListError, ListElementRequest};
use baclist_server::{
    BacnetObject, ListElementHandler, PeerAddress, ServiceDispatcher, DEFAULT_MAX_APDU_OCTETS,
};
use baclist_tools::{parse_hex, to_hex, DeviceFile};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Applies a list-element request APDU to a device described in JSON.
#[derive(Parser, Debug)]
#[command(name = "bacnet-listdevice")]
struct Args {
    /// Device description (objects, property values, registry additions).
    #[arg(long)]
    device: PathBuf,
    /// Confirmed-request APDU in hex, e.g. the output of bacnet-addlist.
    #[arg(long)]
    apdu: String,
    #[arg(long, default_value = "127.0.0.1:47808")]
    peer: SocketAddr,
    #[arg(long, default_value_t = DEFAULT_MAX_APDU_OCTETS)]
    max_apdu: usize,
    /// Write the updated property values back to the device file.
    #[arg(long)]
    save: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut device = DeviceFile::load(&args.device)?;
    let apdu = parse_hex(&args.apdu)?;

    let registry = Arc::new(device.registry());
    let store = Arc::new(device.build_store());
    let dispatcher =
        ServiceDispatcher::new(ListElementHandler::new(store.clone(), registry.clone()))
            .with_max_apdu_octets(args.max_apdu);

    let Some(response) = dispatcher.handle_apdu(&apdu, PeerAddress::Ip(args.peer)).await? else {
        println!("no response");
        return Ok(());
    };
    println!("response: {}", to_hex(&response));
    match ApduType::of(response[0]) {
        Some(ApduType::SimpleAck) => println!("result: simple-ack"),
        Some(ApduType::Error) => {
            let (_, err) = ChangeListError::decode_apdu(&mut Reader::new(&response))?;
            println!("result: {err}");
        }
        Some(ApduType::Reject) => {
            let reject = RejectPdu::decode(&mut Reader::new(&response))?;
            println!("result: reject {:?}", reject.reject_reason());
        }
        other => println!("result: {other:?}"),
    }

    if let Ok(request) = ListElementRequest::decode(&mut Reader::new(&apdu), registry.as_ref()) {
        let value = store
            .get(request.object_id)
            .and_then(|object| object.read_property(request.property_id));
        if let Some(value) = value {
            println!(
                "{} {:?} = {}",
                request.object_id,
                request.property_id,
                serde_json::to_string_pretty(&value)?
            );
        }
    }

    if args.save {
        device.refresh_from(&store);
        device.save(&args.device)?;
        log::info!("saved {}", args.device.display());
    }
    Ok(())
}
