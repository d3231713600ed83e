//! Command definitions and handlers for the CLI.
//!
//! Clap argument structs stay in this crate and convert into the core
//! parameter types, so the core never depends on clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Cellar
//! ```
//!
//! Arguments that need the global `--owner` convert through `into_params`;
//! the rest use `From`.

use anyhow::{anyhow, Context, Result};
use cellar_core::{
    display::{CreateResult, OperationStatus, UpdateResult},
    models::{FoodProfile, Level, PlanStatus, Protein, Readiness, Sauce, SlotOutcome, WineColor},
    params::*,
    Cellar, GroupSize,
};
use clap::{Args, Subcommand};
use log::debug;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Wine commands
// ============================================================================

/// Add a wine to the collection
///
/// Only the name and color are required. Anything left out is estimated when
/// the wine is scored, so region, style and ABV are worth giving.
#[derive(Args)]
pub struct AddWineArgs {
    /// Label name
    pub name: String,
    #[arg(short, long, help = "Color: red, white, rose or sparkling")]
    pub color: WineColor,
    #[arg(long, help = "Vintage year")]
    pub vintage: Option<i32>,
    #[arg(short, long, help = "Region, e.g. 'Barossa Valley' or 'Mosel'")]
    pub region: Option<String>,
    #[arg(short, long, help = "Style hint, e.g. 'oaked' or 'late harvest'")]
    pub style: Option<String>,
    #[arg(long, help = "Alcohol by volume in percent")]
    pub abv: Option<f64>,
    #[arg(short, long, default_value_t = 1, help = "Bottles on hand")]
    pub quantity: u32,
    #[arg(
        long,
        default_value = "unknown",
        help = "Drinking window: ready, peak-soon, hold or unknown"
    )]
    pub readiness: Readiness,
    #[arg(long, help = "Your rating on a 0-5 scale")]
    pub rating: Option<f32>,
}

impl AddWineArgs {
    pub fn into_params(self, owner: &str) -> AddWine {
        AddWine {
            owner: owner.to_string(),
            name: self.name,
            color: self.color,
            vintage: self.vintage,
            region: self.region,
            style: self.style,
            abv: self.abv,
            quantity: self.quantity,
            readiness: self.readiness,
            rating: self.rating,
            profile: None,
        }
    }
}

/// List wines in the collection
#[derive(Args)]
pub struct ListWinesArgs {
    #[arg(short, long, help = "Only wines of this color")]
    pub color: Option<WineColor>,
    #[arg(long, help = "Only wines rated at least this high")]
    pub min_rating: Option<f32>,
    #[arg(long, help = "Hide wines with no bottles left")]
    pub in_stock: bool,
}

impl ListWinesArgs {
    pub fn into_params(self, owner: &str) -> ListWines {
        ListWines {
            owner: owner.to_string(),
            color: self.color,
            min_rating: self.min_rating,
            in_stock: self.in_stock,
        }
    }
}

/// Show one wine
#[derive(Args)]
pub struct ShowWineArgs {
    #[arg(help = "ID of the wine")]
    pub id: u64,
}

impl From<ShowWineArgs> for Id {
    fn from(val: ShowWineArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum WineCommands {
    /// Add a wine to the collection
    #[command(alias = "a")]
    Add(AddWineArgs),
    /// List wines in the collection
    #[command(aliases = ["l", "ls"])]
    List(ListWinesArgs),
    /// Show one wine
    #[command(alias = "s")]
    Show(ShowWineArgs),
}

// ============================================================================
// Lineup and plan commands
// ============================================================================

/// Options for composing a lineup
///
/// Without `--protein` the lineup is picked on readiness alone.
#[derive(Args)]
pub struct ComposeArgs {
    #[arg(
        short,
        long,
        default_value = "medium",
        help = "Group size: small, medium or large"
    )]
    pub group: GroupSize,
    #[arg(short, long, help = "Only wines of this color")]
    pub color: Option<WineColor>,
    #[arg(long, help = "Only wines rated at least this high")]
    pub min_rating: Option<f32>,
    #[arg(
        short,
        long,
        help = "Main protein: beef, lamb, pork, chicken, fish or vegetarian"
    )]
    pub protein: Option<Protein>,
    #[arg(long, help = "Fat level of the dish: low, medium or high")]
    pub fat: Option<Level>,
    #[arg(
        long,
        default_value = "none",
        help = "Sauce: none, tomato, cream, red_wine, citrus or sweet"
    )]
    pub sauce: Sauce,
    #[arg(long, default_value = "low", help = "Spice level: low, medium or high")]
    pub spice: Level,
    #[arg(long, default_value = "low", help = "Smoke level: low, medium or high")]
    pub smoke: Level,
    #[arg(long, help = "Seed for reproducible lineups")]
    pub seed: Option<u64>,
}

impl ComposeArgs {
    pub fn into_params(self, owner: &str) -> ComposeLineup {
        let food = self.protein.map(|protein| FoodProfile {
            protein,
            fat: self.fat,
            sauce: self.sauce,
            spice: self.spice,
            smoke: self.smoke,
        });
        ComposeLineup {
            owner: owner.to_string(),
            group_size: self.group,
            color: self.color,
            min_rating: self.min_rating,
            food,
            seed: self.seed,
        }
    }
}

/// A plan to act on, defaulting to the active one
#[derive(Args)]
pub struct PlanTargetArgs {
    #[arg(help = "ID of the plan; defaults to the active plan")]
    pub plan_id: Option<u64>,
    #[arg(long, help = "Fail if the plan changed since this version")]
    pub expected_version: Option<u64>,
}

/// Jump to a pour
#[derive(Args)]
pub struct MovePlanArgs {
    #[arg(
        value_parser = clap::value_parser!(u32).range(1..),
        help = "1-based position of the pour to move to"
    )]
    pub position: u32,
    #[command(flatten)]
    pub target: PlanTargetArgs,
}

/// Finish the evening
///
/// Every slot listed with `--open` was opened; slots not listed stay in the
/// cellar.
#[derive(Args)]
pub struct CompletePlanArgs {
    #[command(flatten)]
    pub target: PlanTargetArgs,
    #[arg(
        short,
        long = "open",
        value_parser = parse_outcome,
        help = "Opened slot as POSITION[:QUANTITY[:RATING]], repeatable"
    )]
    pub opened: Vec<SlotOutcome>,
}

/// List evening plans
#[derive(Args)]
pub struct ListPlansArgs {
    #[arg(short, long, help = "Only plans in this status: active, completed or cancelled")]
    pub status: Option<PlanStatus>,
}

impl ListPlansArgs {
    pub fn into_params(self, owner: &str) -> ListPlans {
        ListPlans {
            owner: owner.to_string(),
            status: self.status,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Compose a lineup and start an evening plan from it
    #[command(alias = "s")]
    Start(ComposeArgs),
    /// Show a plan, the active one by default
    Show(PlanTargetArgs),
    /// List evening plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Jump to a pour
    #[command(alias = "m")]
    Move(MovePlanArgs),
    /// Move on to the next pour
    #[command(alias = "n")]
    Next(PlanTargetArgs),
    /// Go back to the previous pour
    #[command(alias = "prev")]
    Previous(PlanTargetArgs),
    /// Finish the evening and take opened bottles out of the cellar
    #[command(alias = "c")]
    Complete(CompletePlanArgs),
    /// Abandon a plan without touching the cellar
    Cancel(PlanTargetArgs),
}

/// Show opening history
#[derive(Args)]
pub struct HistoryArgs {
    #[arg(short, long, help = "Only openings of this wine")]
    pub wine: Option<u64>,
}

impl HistoryArgs {
    pub fn into_params(self, owner: &str) -> ListOpenings {
        ListOpenings {
            owner: owner.to_string(),
            item_id: self.wine,
        }
    }
}

/// Parses `POSITION[:QUANTITY[:RATING]]`.
pub fn parse_outcome(value: &str) -> std::result::Result<SlotOutcome, String> {
    let mut parts = value.split(':');
    let position = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid position in '{value}'"))?;
    let mut outcome = SlotOutcome::opened(position);

    if let Some(quantity) = parts.next().filter(|q| !q.is_empty()) {
        outcome.quantity = quantity
            .trim()
            .parse()
            .map_err(|_| format!("Invalid quantity in '{value}'"))?;
    }
    if let Some(rating) = parts.next().filter(|r| !r.is_empty()) {
        outcome.rating = Some(
            rating
                .trim()
                .parse()
                .map_err(|_| format!("Invalid rating in '{value}'"))?,
        );
    }
    if parts.next().is_some() {
        return Err(format!("Expected POSITION[:QUANTITY[:RATING]], got '{value}'"));
    }
    Ok(outcome)
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs CLI commands against a cellar and renders the results.
pub struct Cli {
    cellar: Cellar,
    renderer: TerminalRenderer,
    owner: String,
}

impl Cli {
    pub fn new(cellar: Cellar, renderer: TerminalRenderer, owner: String) -> Self {
        Self {
            cellar,
            renderer,
            owner,
        }
    }

    pub async fn handle_wine_command(&self, command: WineCommands) -> Result<()> {
        match command {
            WineCommands::Add(args) => {
                let wine = self
                    .cellar
                    .add_wine(&args.into_params(&self.owner))
                    .await
                    .context("Failed to add wine")?;
                self.renderer.render(&CreateResult::new(wine).to_string())
            }
            WineCommands::List(args) => {
                let wines = self
                    .cellar
                    .list_wines(&args.into_params(&self.owner))
                    .await
                    .context("Failed to list wines")?;
                self.renderer.render(&wines.to_string())
            }
            WineCommands::Show(args) => {
                let id: Id = args.into();
                let wine = self
                    .cellar
                    .get_wine(&id)
                    .await
                    .context("Failed to get wine")?
                    .ok_or_else(|| anyhow!("Wine with ID {} not found", id.id))?;
                self.renderer.render(&wine.to_string())
            }
        }
    }

    pub async fn compose_lineup(&self, args: ComposeArgs) -> Result<()> {
        let params = args.into_params(&self.owner);
        debug!("Composing lineup: {params:?}");

        let lineup = self
            .cellar
            .compose_lineup(&params)
            .await
            .context("Failed to compose lineup")?;
        self.renderer.render(&format!("# Lineup\n\n{lineup}"))
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Start(args) => {
                let plan = self
                    .cellar
                    .plan_evening(&args.into_params(&self.owner))
                    .await
                    .context("Failed to start evening plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::Show(target) => self.show_plan(target.plan_id).await,
            PlanCommands::List(args) => {
                let plans = self
                    .cellar
                    .list_plans(&args.into_params(&self.owner))
                    .await
                    .context("Failed to list plans")?;
                self.renderer.render(&plans.to_string())
            }
            PlanCommands::Move(args) => {
                let params = MoveCursor {
                    plan_id: self.resolve_plan_id(args.target.plan_id).await?,
                    index: args.position as usize - 1,
                    expected_version: args.target.expected_version,
                };
                let plan = self
                    .cellar
                    .move_plan_cursor(&params)
                    .await
                    .context("Failed to move to pour")?;
                self.render_cursor(plan)
            }
            PlanCommands::Next(target) => {
                let params = self.plan_ref(target).await?;
                let plan = self
                    .cellar
                    .next_pour(&params)
                    .await
                    .context("Failed to move to the next pour")?;
                self.render_cursor(plan)
            }
            PlanCommands::Previous(target) => {
                let params = self.plan_ref(target).await?;
                let plan = self
                    .cellar
                    .previous_pour(&params)
                    .await
                    .context("Failed to move to the previous pour")?;
                self.render_cursor(plan)
            }
            PlanCommands::Complete(args) => {
                let params = CompletePlan {
                    plan_id: self.resolve_plan_id(args.target.plan_id).await?,
                    outcomes: args.opened,
                    expected_version: args.target.expected_version,
                };
                let plan = self
                    .cellar
                    .complete_plan(&params)
                    .await
                    .context("Failed to complete plan")?;
                let changes = vec![format!(
                    "Completed with {} bottle(s) opened",
                    plan.bottles_opened.unwrap_or(0)
                )];
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
            PlanCommands::Cancel(target) => {
                let params = self.plan_ref(target).await?;
                self.cellar
                    .cancel_plan(&params)
                    .await
                    .context("Failed to cancel plan")?;
                let status =
                    OperationStatus::success(format!("Cancelled plan {}", params.plan_id));
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn show_history(&self, args: HistoryArgs) -> Result<()> {
        let openings = self
            .cellar
            .list_openings(&args.into_params(&self.owner))
            .await
            .context("Failed to list openings")?;
        self.renderer.render(&openings.to_string())
    }

    /// Shows a plan, or the owner's active plan when no ID is given.
    pub async fn show_plan(&self, plan_id: Option<u64>) -> Result<()> {
        let plan = match plan_id {
            Some(id) => self
                .cellar
                .get_plan(&Id { id })
                .await
                .context("Failed to get plan")?
                .ok_or_else(|| anyhow!("Plan with ID {id} not found"))?,
            None => match self.active_plan().await? {
                Some(plan) => plan,
                None => {
                    return self.renderer.render(&format!(
                        "No active plan for {}. Start one with `cellar plan start`.\n",
                        self.owner
                    ))
                }
            },
        };
        self.renderer.render(&plan.to_string())
    }

    async fn active_plan(&self) -> Result<Option<cellar_core::EveningPlan>> {
        self.cellar
            .get_active_plan(&Owner {
                owner: self.owner.clone(),
            })
            .await
            .context("Failed to load active plan")
    }

    async fn resolve_plan_id(&self, plan_id: Option<u64>) -> Result<u64> {
        match plan_id {
            Some(id) => Ok(id),
            None => self
                .active_plan()
                .await?
                .map(|plan| plan.id)
                .ok_or_else(|| anyhow!("No active plan for {}", self.owner)),
        }
    }

    async fn plan_ref(&self, target: PlanTargetArgs) -> Result<PlanRef> {
        Ok(PlanRef {
            plan_id: self.resolve_plan_id(target.plan_id).await?,
            expected_version: target.expected_version,
        })
    }

    fn render_cursor(&self, plan: cellar_core::EveningPlan) -> Result<()> {
        let changes = plan
            .now_playing()
            .map(|slot| vec![format!("Now pouring #{}: {}", slot.position, slot.name)])
            .unwrap_or_default();
        self.renderer
            .render(&UpdateResult::with_changes(plan, changes).to_string())
    }
}
