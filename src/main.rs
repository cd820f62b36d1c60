//! qclassify - 问题分类命令行工具

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qclassifier::{
    ConfigManager, QuestionClassificationService, QuestionType, RuleLibrary, RuleLoader,
};

#[derive(Parser, Debug)]
#[command(name = "qclassify", version, about = "Rule-based question classifier")]
struct Cli {
    /// 自定义规则文件（JSON），默认使用内置规则表
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 分类一个问题
    Classify(QuestionArgs),
    /// 输出每条规则的命中详情
    Analyze(QuestionArgs),
    /// 校验声明的问题类型
    Validate {
        /// 声明的类型：objective / structured / opinion
        #[arg(long)]
        expect: QuestionType,
        #[command(flatten)]
        question: QuestionArgs,
    },
    /// 以 JSON 打印当前生效的规则表
    Rules,
}

#[derive(Args, Debug)]
struct QuestionArgs {
    /// 问题标题
    #[arg(long, default_value = "")]
    title: String,
    /// 问题正文
    #[arg(long, default_value = "")]
    content: String,
    /// 直接给出完整问题文本（追加在正文之后）
    text: Vec<String>,
    /// 以 JSON 输出
    #[arg(long)]
    json: bool,
}

impl QuestionArgs {
    fn content(&self) -> String {
        let free_text = self.text.join(" ");
        format!("{} {}", self.content, free_text).trim().to_string()
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.title.trim().is_empty() && self.content().is_empty() {
            bail!("请通过 --title/--content 或位置参数提供问题文本");
        }
        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut builder = ConfigManager::custom().verbose(cli.verbose);
    if let Some(path) = cli.rules.clone() {
        builder = builder.rule_file(path);
    }
    let config = builder.build();

    match cli.command {
        Command::Rules => {
            let rule_lib: RuleLibrary = RuleLoader::load(&config).context("加载规则失败")?;
            println!("{}", RuleLoader::to_json_pretty(&rule_lib)?);
        }
        Command::Classify(args) => {
            args.ensure_not_empty()?;
            let service = QuestionClassificationService::with_config(config).context("初始化分类器失败")?;
            let record = service.classify_question(&args.title, &args.content());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let badge = QuestionClassificationService::badge(record.question_type);
                println!("{} {} (confidence {:.2})", badge.icon, badge.label, record.confidence);
                for reason in &record.reasoning {
                    println!("  - {}", reason);
                }
            }
        }
        Command::Analyze(args) => {
            args.ensure_not_empty()?;
            let service = QuestionClassificationService::with_config(config).context("初始化分类器失败")?;
            let analysis = service.analyze_question(&args.title, &args.content());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                let classification = &analysis.classification;
                println!(
                    "{} (confidence {:.2})",
                    classification.category, classification.confidence
                );
                for detail in &analysis.rule_matches {
                    let mark = if detail.matched { "✓" } else { " " };
                    println!(
                        "  [{}] {:<22} {:<10} {:.2}",
                        mark, detail.rule_name, detail.category.as_str(), detail.score
                    );
                }
            }
        }
        Command::Validate { expect, question } => {
            question.ensure_not_empty()?;
            let service = QuestionClassificationService::with_config(config).context("初始化分类器失败")?;
            let validation = service.validate_question_type(expect, &question.title, &question.content());
            if question.json {
                println!("{}", serde_json::to_string_pretty(&validation)?);
            } else if validation.is_valid {
                println!("✓ {} (confidence {:.2})", expect, validation.confidence);
            } else if let Some(suggested) = validation.suggested_type {
                println!(
                    "✗ declared {}, classifier suggests {} (confidence {:.2})",
                    expect, suggested, validation.confidence
                );
            }
        }
    }

    Ok(())
}
