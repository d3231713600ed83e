//! Display implementations for domain models.
//!
//! All output is markdown so the same text works in the terminal renderer and
//! in MCP tool responses.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    estimator::estimate_profile,
    models::{
        plan::MAX_RATING, EveningPlan, LineupSlot, Opening, PlanStatus, Readiness, Wine,
        WineColor, WineProfile,
    },
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WineProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "body {:.1}, tannin {:.1}, oak {:.1}, acidity {:.1}, sweetness {:.1}, alcohol {:.1} (power {:.1})",
            self.body,
            self.tannin,
            self.oak,
            self.acidity,
            self.sweetness,
            self.alcohol,
            self.power()
        )
    }
}

impl fmt::Display for Wine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vintage {
            Some(vintage) => writeln!(f, "## {} {vintage} (ID: {})", self.name, self.id)?,
            None => writeln!(f, "## {} NV (ID: {})", self.name, self.id)?,
        }
        writeln!(f)?;

        writeln!(f, "- **Color**: {}", self.color)?;
        if let Some(region) = &self.region {
            writeln!(f, "- **Region**: {region}")?;
        }
        if let Some(style) = &self.style {
            writeln!(f, "- **Style**: {style}")?;
        }
        if let Some(abv) = self.abv {
            writeln!(f, "- **ABV**: {abv:.1}%")?;
        }
        writeln!(f, "- **Bottles**: {}", self.quantity)?;
        writeln!(f, "- **Readiness**: {}", self.readiness)?;
        if let Some(rating) = self.rating {
            writeln!(f, "- **Rating**: {rating:.1}/{MAX_RATING}")?;
        }
        if self.profile.is_some() {
            writeln!(f, "- **Profile**: {}", estimate_profile(self))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for LineupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. **{}**: {} (wine {})",
            self.position, self.label, self.name, self.item_id
        )?;
        if self.locked {
            write!(f, " [locked]")?;
        }
        Ok(())
    }
}

impl fmt::Display for EveningPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Evening plan {}", self.id)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Owner: {}", self.owner)?;
        writeln!(f, "- Version: {}", self.version)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }
        if let Some(bottles) = self.bottles_opened {
            writeln!(f, "- Bottles opened: {bottles}")?;
        }
        if let Some(average) = self.average_rating {
            writeln!(f, "- Average rating: {average:.2}/{MAX_RATING}")?;
        }

        writeln!(f, "\n## Lineup")?;
        writeln!(f)?;
        for (index, slot) in self.queue.iter().enumerate() {
            if index == self.now_playing_index && self.status == PlanStatus::Active {
                writeln!(f, "{slot} <- now pouring")?;
            } else {
                writeln!(f, "{slot}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {}: wine {} x{} (plan {})",
            LocalDateTime(&self.opened_at),
            self.item_id,
            self.quantity,
            self.plan_id
        )?;
        if let Some(rating) = self.rating {
            write!(f, ", rated {rating:.1}/{MAX_RATING}")?;
        }
        if let Some(notes) = &self.notes {
            write!(f, ", \"{notes}\"")?;
        }
        writeln!(f)
    }
}
