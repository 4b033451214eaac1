use std::{io::Write, sync::Arc};

use clap::Parser;
use revbot_config::Config;
use revbot_core::CoreModule;
use revbot_database_memory::MemoryDb;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self::with_db(MemoryDb::new())
    }

    /// Context sharing the state of an existing database.
    pub fn with_db(db_service: MemoryDb) -> Self {
        Self {
            config: Config::from_env_no_version(),
            core_module: CoreModule::builder().build(),
            db_service,
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            writer,
        }
    }
}

pub(crate) async fn try_test_command(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> (crate::Result<()>, String) {
    let buf = Arc::new(RwLock::new(Vec::new()));

    let result = {
        let command_args = {
            let mut tmp_args = vec!["revbot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => {
                CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await
            }
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    };

    let vec = buf.read().await.to_vec();
    (result, std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, output) = try_test_command(ctx, command_args).await;
    result.unwrap();
    output
}

/// Runs a command against a shared database.
pub(crate) async fn test_command_on(db: &MemoryDb, command_args: &[&str]) -> String {
    test_command(CommandContextTest::with_db(db.clone()), command_args).await
}
