mod dns_header;
mod dns_message;
mod dns_question_and_answer;
mod error;
mod hexdump;
mod labels;
mod local;
mod rdata;
mod server;

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use log::info;

use local::FixedAnswers;
use server::DnsServer;

#[derive(Parser, Debug)]
#[command(name = "fixed-answer-dns")]
struct Args {
    /// UDP address to listen on
    #[arg(long, default_value = "0.0.0.0:5553")]
    bind: SocketAddr,

    /// IPv4 address returned for A questions
    #[arg(long, default_value = "192.168.7.93")]
    address: String,

    /// Canonical name returned for CNAME questions
    #[arg(long, default_value = "canonical.example.com.")]
    cname: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let answers = FixedAnswers::new(&args.address, &args.cname)
        .with_context(|| format!("invalid answer data {} / {}", args.address, args.cname))?;

    let server = DnsServer::new(args.bind, answers)
        .with_context(|| format!("failed to bind to {}", args.bind))?;

    info!("listening for DNS queries on {}", server.local_addr()?);

    server.run();

    Ok(())
}
