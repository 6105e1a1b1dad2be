use clap::Parser;
use form_ref::app::service::{render_generate, render_prefixes, render_validation};
use form_ref::config::{CliConfig, Command, GenerateArgs};
use form_ref::utils::error::ErrorSeverity;
use form_ref::utils::{logger, validation::Validate};
use form_ref::{
    FormRefError, FormReferenceCodec, FormService, NumberSource, OutputFormat, PrefixChoice,
    SeededSource, ThreadRngSource, TomlConfig,
};
use std::io::BufRead;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting form-ref CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config) {
        Ok(all_valid) => {
            if !all_valid {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ form-ref failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼，1 保留給驗證失敗
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 3,
                ErrorSeverity::Critical => 4,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

/// 回傳 false 代表有候選編號未通過驗證
fn run(config: &CliConfig) -> Result<bool, FormRefError> {
    config.validate()?;

    let toml = match &config.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    toml.validate()?;

    let format = config.format.unwrap_or_else(|| toml.output_format());

    match &config.command {
        Command::Generate(args) => {
            // 命令列的 seed 優先於設定檔
            match args.seed.or(toml.seed()) {
                Some(seed) => {
                    tracing::info!("Using seeded random source ({})", seed);
                    let codec = FormReferenceCodec::with_source(SeededSource::new(seed));
                    generate(codec, &toml, args, format)?;
                }
                None => {
                    let codec = FormReferenceCodec::<ThreadRngSource>::new();
                    generate(codec, &toml, args, format)?;
                }
            }
            Ok(true)
        }
        Command::Validate(args) => {
            let service = FormService::from_config(FormReferenceCodec::new(), &toml)?;

            let candidates = if args.candidates.is_empty() {
                tracing::debug!("Reading candidates from stdin");
                read_stdin_lines()?
            } else {
                args.candidates.clone()
            };

            let report = service.validate(&candidates);
            println!("{}", render_validation(&report, format)?);
            tracing::info!(
                "Checked {} candidate(s): {} valid, {} invalid",
                report.entries.len(),
                report.valid_count,
                report.invalid_count
            );
            Ok(report.all_valid())
        }
        Command::Prefixes => {
            let registry = toml.prefix_registry()?;
            println!("{}", render_prefixes(&registry, format)?);
            Ok(true)
        }
    }
}

fn generate<S: NumberSource>(
    codec: FormReferenceCodec<S>,
    toml: &TomlConfig,
    args: &GenerateArgs,
    format: OutputFormat,
) -> Result<(), FormRefError> {
    let service = FormService::from_config(codec, toml)?;

    let choice = if args.bare {
        PrefixChoice::Bare
    } else if let Some(category) = &args.category {
        PrefixChoice::Category(category.clone())
    } else if let Some(prefix) = &args.prefix {
        PrefixChoice::Raw(prefix.clone())
    } else {
        PrefixChoice::Default
    };

    let report = service.generate(&choice, args.count, args.distinct)?;
    println!("{}", render_generate(&report, format)?);
    Ok(())
}

fn read_stdin_lines() -> Result<Vec<String>, FormRefError> {
    let stdin = std::io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        // 空行略過，其他空白不去除，交給驗證判斷
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
