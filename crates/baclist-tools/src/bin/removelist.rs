use baclist_core::services::ListElementService;
use baclist_tools::{encode_request, to_hex, RequestArgs};
use clap::Parser;

/// Prints a RemoveListElement request APDU as hex.
#[derive(Parser, Debug)]
#[command(name = "bacnet-removelist")]
struct Args {
    #[command(flatten)]
    request: RequestArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let request = args.request.to_request(ListElementService::Remove)?;
    log::debug!("encoding {request:?}");
    println!("{}", to_hex(&encode_request(&request)?));
    Ok(())
}
