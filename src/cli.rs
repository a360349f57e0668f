use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "qr-scan")]
#[command(about = "カメラ映像からバーコード・QRコードを検出・記録する", long_about = None)]
pub struct Cli {
    /// カメラのデバイス番号
    #[arg(short, long)]
    pub camera: Option<u32>,

    /// ログファイル（.txt/.csv）の出力先フォルダ
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 新規検出時の通知音を鳴らさない
    #[arg(long)]
    pub no_beep: bool,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,

    /// 有効な設定を表示して終了
    #[arg(long)]
    pub show_config: bool,

    /// 引数で上書きした設定を設定ファイルに保存して終了
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// 設定ファイルの値をコマンドライン引数で上書き
    pub fn apply(&self, config: &mut Config) {
        if let Some(index) = self.camera {
            config.camera_index = index;
        }
        if let Some(dir) = &self.output_dir {
            config.relocate_logs(dir);
        }
        if self.no_beep {
            config.beep = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_keeps_config() {
        let cli = Cli::parse_from(["qr-scan"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["qr-scan", "--camera", "1", "-o", "/data", "--no-beep"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.camera_index, 1);
        assert_eq!(config.text_log, PathBuf::from("/data/hasil_scan.txt"));
        assert!(!config.beep);
    }

    #[test]
    fn test_save_config_flag() {
        assert!(!Cli::parse_from(["qr-scan"]).save_config);
        let cli = Cli::parse_from(["qr-scan", "--save-config", "-c", "2"]);
        assert!(cli.save_config);
        assert_eq!(cli.camera, Some(2));
    }
}
