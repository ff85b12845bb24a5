use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foodscan")]
#[command(about = "食事写真の栄養推定・チャット記録クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を解析して結果を確認・記録
    Scan {
        /// 写真ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 数量を指定（省略時は推定値）
        #[arg(short, long)]
        quantity: Option<u32>,

        /// 確認せずに記録
        #[arg(short, long)]
        yes: bool,

        /// 推定結果をJSONで出力（確認・記録はしない）
        #[arg(long)]
        json: bool,
    },

    /// アシスタントにメッセージを送信
    Chat {
        #[arg(required = true)]
        message: String,
    },

    /// 対話式の食事記録セッション
    Session,

    /// 保存済みの推定JSONから合計値を再計算
    Totals {
        /// 推定結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 数量（省略時は推定値）
        #[arg(short, long)]
        quantity: Option<u32>,
    },

    /// 設定を表示/編集
    Config {
        /// 推定APIのURLを設定
        #[arg(long)]
        set_macros_url: Option<String>,

        /// チャットAPIのURLを設定
        #[arg(long)]
        set_chat_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
