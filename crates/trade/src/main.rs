use color_eyre::eyre;
use structopt::StructOpt;
use tracing::{info, warn};

use exchanges::okex::has_api_credentials;
use exchanges::okex::mapping::contract_value;
use exchanges::{FutureExchange, OkexSwap};
use interface::{CurrencyPair, OpenType, PlaceOrderOptions};
use trade::report;

// lib.rs에서 자동으로 dotenv가 로드됨

#[derive(Debug, StructOpt)]
struct Market {
    /// 거래쌍 (예: BTC_USD)
    #[structopt(long, default_value = "BTC_USD")]
    pair: CurrencyPair,
    /// swap 상품 id (예: BTC-USD-SWAP)
    #[structopt(long, default_value = "BTC-USD-SWAP")]
    contract: String,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "trade", about = "OKEx 무기한 선물(swap) 거래 도구")]
enum Command {
    /// 티커 조회
    Ticker(Market),
    /// 호가 조회
    Depth {
        #[structopt(flatten)]
        market: Market,
        #[structopt(long, default_value = "20")]
        size: u32,
    },
    /// 계정 잔고 조회
    Account,
    /// 미체결 + 부분 체결 주문 조회
    Orders(Market),
    /// 단건 주문 조회
    Order {
        #[structopt(flatten)]
        market: Market,
        order_id: String,
    },
    /// 포지션 조회
    Position(Market),
    /// 주문
    Place {
        #[structopt(flatten)]
        market: Market,
        #[structopt(long)]
        price: String,
        #[structopt(long)]
        amount: String,
        /// 1: 롱 진입, 2: 숏 진입, 3: 롱 청산, 4: 숏 청산
        #[structopt(long, default_value = "1")]
        open_type: i32,
        /// 지정가 대신 상대 최우선 호가로 체결
        #[structopt(long)]
        match_price: bool,
    },
    /// 주문 취소
    Cancel {
        #[structopt(flatten)]
        market: Market,
        order_id: String,
    },
    /// 계약 1장의 USD 가치
    ContractValue {
        #[structopt(long, default_value = "BTC_USD")]
        pair: CurrencyPair,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    // init logging
    let _guards = trade::logger::init_tracing("logs", "okex-swap")?;

    let cmd = Command::from_args();

    if let Command::ContractValue { pair } = cmd {
        println!("{} {}", pair, contract_value(pair)?);
        return Ok(());
    }

    if !has_api_credentials() {
        eyre::bail!("OKEX_API_KEY, OKEX_API_SECRET, OKEX_API_PASSPHRASE 를 .env 또는 환경변수에 설정하세요");
    }

    let client = OkexSwap::with_credentials()?;
    info!("{} 연결 설정 완료 ({})", client.id(), client.config().endpoint);

    run(&client, cmd).await
}

async fn run(client: &impl FutureExchange, cmd: Command) -> eyre::Result<()> {
    match cmd {
        Command::Ticker(Market { pair, contract }) => {
            let ticker = client.fetch_ticker(pair, &contract).await?;
            print!("{}", report::format_ticker(&ticker));
        }
        Command::Depth { market, size } => {
            let depth = client
                .fetch_depth(market.pair, &market.contract, size)
                .await?;
            print!("{}", report::format_depth(&depth));
        }
        Command::Account => {
            let account = client.fetch_account().await?;
            print!("{}", report::format_account(&account));
        }
        Command::Orders(Market { pair, contract }) => {
            let result = client.fetch_unfinished_orders(pair, &contract).await?;
            if result.is_partial() {
                warn!("부분 체결 주문 목록을 가져오지 못했습니다");
            }
            print!("{}", report::format_unfinished_orders(&result));
        }
        Command::Order { market, order_id } => {
            let order = client
                .fetch_order(&order_id, market.pair, &market.contract)
                .await?;
            print!("{}", report::format_order(&order));
        }
        Command::Position(Market { pair, contract }) => {
            for position in client.fetch_position(pair, &contract).await? {
                print!("{}", report::format_position(&position));
            }
        }
        Command::Place {
            market,
            price,
            amount,
            open_type,
            match_price,
        } => {
            let options = PlaceOrderOptions {
                open_type: OpenType::try_from(open_type)?,
                match_price,
            };
            let order_id = client
                .place_order(market.pair, &market.contract, &price, &amount, options)
                .await?;
            info!("주문 완료: {}", order_id);
            println!("{}", order_id);
        }
        Command::Cancel { market, order_id } => {
            let cancelled = client
                .cancel_order(market.pair, &market.contract, &order_id)
                .await?;
            println!("{} cancelled: {}", order_id, cancelled);
        }
        Command::ContractValue { pair } => {
            println!("{} {}", pair, client.contract_value(pair)?);
        }
    }

    Ok(())
}
