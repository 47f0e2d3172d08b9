use std::{fs, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use cookbook_common::{
    models::{RecipeInput, RecipeOutput},
    recipe::{AddLiquidityRecipe, RemoveLiquidityRecipe, StepRecipe, SwapRecipe},
    step::token::ApproveERC20SpenderStep,
    FeeConfig, Recipe,
};
use tracing::{debug, info, warn};
use tracing_appender::rolling;

use crate::{
    plan::{FeeSettings, Plan, RecipeSpec},
    provider::StaticQuoteProvider,
};

/// Cookbook CLI - plans private DeFi recipes.
///
/// Reads a plan file naming a recipe, the balances to unshield and the quotes to use, and prints
/// the ordered, fee-reconciled transaction plan as JSON. Nothing is signed or broadcast.
#[derive(Parser, Debug, Clone, PartialEq)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
struct CliArgs {
    /// Path to the JSON plan file.
    #[clap(short = 'p', long)]
    plan: PathBuf,

    /// Shield fee in basis points. Overrides the plan's fee config.
    #[clap(long, env = "COOKBOOK_SHIELD_FEE_BPS")]
    shield_fee_bps: Option<u32>,

    /// Unshield fee in basis points, applied on every network. Overrides the plan's fee config.
    #[clap(long, env = "COOKBOOK_UNSHIELD_FEE_BPS")]
    unshield_fee_bps: Option<u32>,

    /// Write the recipe output here instead of stdout.
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// Logging folder path.
    #[clap(long, default_value = "logs")]
    log_folder: String,

    /// Enable verbose logging, including every step as it runs.
    #[clap(long)]
    verbose: bool,
}

impl CliArgs {
    fn validate(&self) -> anyhow::Result<()> {
        // Fee overrides must be set together - either both or neither
        match (self.shield_fee_bps, self.unshield_fee_bps) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("Both shield_fee_bps and unshield_fee_bps must be set.")
            }
            _ => Ok(()),
        }
    }

    fn fee_overrides(&self) -> Option<FeeSettings> {
        Some(FeeSettings {
            shield_fee_basis_points: self.shield_fee_bps?,
            unshield_fee_basis_points: self.unshield_fee_bps?,
        })
    }
}

pub async fn run_cli() -> anyhow::Result<()> {
    let args: CliArgs = CliArgs::parse();
    args.validate()?;

    // Setup Logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let (non_blocking, _guard) =
        tracing_appender::non_blocking(rolling::never(&args.log_folder, "cookbook.log"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(non_blocking)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging subscriber")?;

    info!("Running with version: {}", option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"));
    let plan = Plan::from_file(&args.plan)?;
    let output = run(plan, args.fee_overrides()).await?;

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize recipe output")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "Wrote recipe output");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Builds the recipe a plan describes and runs it.
async fn run(plan: Plan, fee_overrides: Option<FeeSettings>) -> anyhow::Result<RecipeOutput> {
    let fee_config = Arc::new(resolve_fee_config(fee_overrides.or(plan.fee_config))?);
    let recipe = build_recipe(plan.recipe, fee_config)?;
    debug!(recipe = recipe.name(), "Built recipe");

    let output = recipe
        .get_recipe_output(&plan.input)
        .await
        .with_context(|| format!("{} failed", recipe.name()))?;
    log_summary(&plan.input, &output);
    Ok(output)
}

fn resolve_fee_config(settings: Option<FeeSettings>) -> anyhow::Result<FeeConfig> {
    let fee_config = match settings {
        Some(settings) => settings.into_fee_config()?,
        None => FeeConfig::unconfigured(),
    };
    if !fee_config.is_configured() {
        warn!("No fee configuration set; unshield and shield steps will fail");
    }
    Ok(fee_config)
}

fn build_recipe(
    recipe_spec: RecipeSpec,
    fee_config: Arc<FeeConfig>,
) -> anyhow::Result<Box<dyn Recipe>> {
    let recipe: Box<dyn Recipe> = match recipe_spec {
        RecipeSpec::Swap {
            exchange_name,
            sell_token,
            buy_token,
            sell_amount,
            slippage_basis_points,
            quote,
        } => {
            let provider = StaticQuoteProvider::new(exchange_name).with_swap_quote(quote);
            let recipe = SwapRecipe::new(
                fee_config,
                Arc::new(provider),
                sell_token,
                buy_token,
                slippage_basis_points,
            );
            match sell_amount {
                Some(amount) => Box::new(recipe.with_sell_amount(amount)),
                None => Box::new(recipe),
            }
        }
        RecipeSpec::AddLiquidity {
            protocol_name,
            token_a,
            token_b,
            slippage_basis_points,
            quote,
        } => Box::new(AddLiquidityRecipe::new(
            fee_config,
            Arc::new(StaticQuoteProvider::new(protocol_name).with_add_liquidity_quote(quote)),
            token_a,
            token_b,
            slippage_basis_points,
        )),
        RecipeSpec::RemoveLiquidity {
            protocol_name,
            lp_token,
            token_a,
            token_b,
            slippage_basis_points,
            quote,
        } => Box::new(RemoveLiquidityRecipe::new(
            fee_config,
            Arc::new(StaticQuoteProvider::new(protocol_name).with_remove_liquidity_quote(quote)),
            lp_token,
            token_a,
            token_b,
            slippage_basis_points,
        )),
        RecipeSpec::Steps { name, description, approvals } => {
            let mut recipe = StepRecipe::new(name, description, fee_config);
            for approval in approvals {
                recipe.add_step(Arc::new(ApproveERC20SpenderStep::new(
                    approval.spender,
                    approval.token,
                    approval.amount,
                )))?;
            }
            Box::new(recipe)
        }
    };
    Ok(recipe)
}

fn log_summary(input: &RecipeInput, output: &RecipeOutput) {
    for step in &output.step_outputs {
        debug!(
            step = %step.name,
            transactions = step.populated_transactions.len(),
            outputs = step.output_erc20_amounts.len(),
            fees = step.fee_erc20_amount_recipients.len(),
            "Step planned"
        );
    }
    info!(
        network = %input.network_name,
        transactions = output.populated_transactions.len(),
        reshield_tokens = output.shield_erc20_addresses.len(),
        "Plan ready"
    );
}
