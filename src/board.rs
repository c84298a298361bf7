//! Price Board
//!
//! Renders resolved prices for a set of products as a storefront price
//! board: list price, price now, savings, winning promotion and countdown.

use std::io;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    badges::badge_text,
    discounts::percent_points,
    pricing::ResolvedPrice,
    products::{Category, CategoryKey, Product, ProductKey},
    promotions::{Promotion, PromotionKey, PromotionMeta},
};

/// Errors that can occur when rendering a price board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A row references a product missing from the product metadata.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// A product references a category missing from the category metadata.
    #[error("Missing category")]
    MissingCategory(CategoryKey),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A board of resolved prices, one row per product.
#[derive(Debug, Clone, Default)]
pub struct PriceBoard<'a> {
    rows: Vec<(ProductKey, ResolvedPrice<'a>)>,
}

impl<'a> PriceBoard<'a> {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a board from resolved rows.
    #[must_use]
    pub fn with_rows(rows: Vec<(ProductKey, ResolvedPrice<'a>)>) -> Self {
        Self { rows }
    }

    /// Append one resolved row.
    pub fn push(&mut self, product: ProductKey, resolution: ResolvedPrice<'a>) {
        self.rows.push((product, resolution));
    }

    /// The resolved rows, in insertion order.
    pub fn rows(&self) -> &[(ProductKey, ResolvedPrice<'a>)] {
        &self.rows
    }

    /// Number of rows on the board.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the board has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows with an applied promotion.
    pub fn promoted_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|(_, resolution)| resolution.is_promoted())
            .count()
    }

    /// Total savings against list prices, or `None` for an empty board.
    #[must_use]
    pub fn total_savings(&self) -> Option<Money<'a, Currency>> {
        let (_, first) = self.rows.first()?;

        let total = self
            .rows
            .iter()
            .map(|(_, resolution)| resolution.savings().to_minor_units())
            .sum();

        Some(Money::from_minor(total, first.list_price.currency()))
    }

    /// Renders the board as a table followed by summary lines.
    ///
    /// Promotion metadata is looked up leniently: a row whose promotion is
    /// missing from `promotion_meta` renders as `<unknown>`.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if a product or category referenced by a
    /// row is missing, or if the output cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        product_meta: &SlotMap<ProductKey, Product<'a>>,
        category_meta: &SlotMap<CategoryKey, Category>,
        promotion_meta: &SlotMap<PromotionKey, PromotionMeta>,
        promotions: &[Promotion<'a>],
        now: Timestamp,
    ) -> Result<(), BoardError> {
        let mut builder = Builder::default();

        builder.push_record([
            "",
            "Product",
            "Category",
            "List Price",
            "Now",
            "Savings",
            "Promotion",
            "Ends In",
        ]);

        let mut color_ops: SmallVec<[(usize, usize, Color); 32]> = SmallVec::new();

        for (row_idx, (product_key, resolution)) in self.rows.iter().enumerate() {
            let row = row_idx + 1; // header is row 0

            let product = product_meta
                .get(*product_key)
                .ok_or(BoardError::MissingProduct(*product_key))?;

            let category_name = match product.category {
                Some(category_key) => category_meta
                    .get(category_key)
                    .map(|category| category.name.clone())
                    .ok_or(BoardError::MissingCategory(category_key))?,
                None => String::new(),
            };

            let cells = resolution_cells(resolution, promotion_meta, promotions, now);

            builder.push_record([
                format!("#{:<3}", row),
                product.name.clone(),
                category_name,
                format!("{}", resolution.list_price),
                cells.now,
                cells.savings,
                cells.promotion,
                cells.ends_in,
            ]);

            color_ops.push((row, 2, color_dark_grey()));
            color_ops.push((row, 3, color_dark_grey()));

            if resolution.savings().to_minor_units() > 0 {
                color_ops.push((row, 4, Color::FG_GREEN));
            }

            if cells.ending_soon {
                color_ops.push((row, 7, Color::FG_RED));
            }
        }

        write_board_table(&mut out, builder, color_ops)?;

        write_board_summary(&mut out, self)?;

        Ok(())
    }
}

/// Cell contents derived from one resolved row.
struct ResolutionCells {
    now: String,
    savings: String,
    promotion: String,
    ends_in: String,
    ending_soon: bool,
}

/// Build the display cells for one resolved row.
fn resolution_cells(
    resolution: &ResolvedPrice<'_>,
    promotion_meta: &SlotMap<PromotionKey, PromotionMeta>,
    promotions: &[Promotion<'_>],
    now: Timestamp,
) -> ResolutionCells {
    let savings = resolution.savings();

    let savings_cell = if savings.to_minor_units() > 0 {
        format!(
            "({}%) -{savings}",
            percent_points(resolution.savings_percent())
        )
    } else {
        String::new()
    };

    let applied = resolution
        .applied_promotion
        .map(|key| {
            let name = promotion_meta
                .get(key)
                .map_or("<unknown>", |meta| meta.name.as_str());

            (key, name)
        })
        .and_then(|(key, name)| {
            promotions
                .iter()
                .find(|promotion| promotion.key() == key)
                .map(|promotion| (promotion, name))
        });

    let (promotion_cell, ends_in, ending_soon) = match applied {
        Some((promotion, name)) => {
            let countdown = promotion.schedule().countdown(now);

            (
                format!("{} {name}", badge_text(promotion.benefit())),
                countdown.to_string(),
                countdown.is_ending_soon(),
            )
        }
        None => (String::new(), String::new(), false),
    };

    ResolutionCells {
        now: format!("{}", resolution.final_price),
        savings: savings_cell,
        promotion: promotion_cell,
        ends_in,
        ending_soon,
    }
}

fn write_board_table(
    out: &mut impl io::Write,
    builder: Builder,
    color_ops: SmallVec<[(usize, usize, Color); 32]>,
) -> Result<(), BoardError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    writeln!(out, "\n{table}").map_err(|_err| BoardError::IO)
}

fn write_board_summary(out: &mut impl io::Write, board: &PriceBoard<'_>) -> Result<(), BoardError> {
    writeln!(out, " Products:      {}", board.len()).map_err(|_err| BoardError::IO)?;
    writeln!(out, " On promotion:  {}", board.promoted_count()).map_err(|_err| BoardError::IO)?;

    if let Some(savings) = board.total_savings() {
        writeln!(out, " Total savings: {savings}").map_err(|_err| BoardError::IO)?;
    }

    Ok(())
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
