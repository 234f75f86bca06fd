//! Production and blending exercises: feed rations, diets, crop planting and
//! paint mixing.

use linprog_solver::{ConstraintOp, LinearExpr, Model, VarId};

use crate::error::{ProblemError, check_len};

/// A raw material with a unit cost and a limited stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub cost: f64,
    pub available: f64,
}

/// A product made from the ingredients, `usage` parallel to them.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedProduct {
    pub name: String,
    pub price: f64,
    pub usage: Vec<f64>,
}

/// How many whole units of each feed to produce for maximum profit.
///
/// Variables: one integer variable per product, named after the product.
/// Constraints: `stock_<ingredient>` per ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct Ration {
    pub ingredients: Vec<Ingredient>,
    pub products: Vec<FeedProduct>,
}

impl Ration {
    /// Unit profit of each product: price minus ingredient cost.
    pub fn unit_profits(&self) -> Vec<f64> {
        self.products
            .iter()
            .map(|p| {
                let cost: f64 = p.usage.iter().zip(&self.ingredients).map(|(u, i)| u * i.cost).sum();
                p.price - cost
            })
            .collect()
    }

    pub fn model(&self) -> Result<Model, ProblemError> {
        for product in &self.products {
            check_len("ingredient usage", self.ingredients.len(), product.usage.len())?;
        }

        let mut model = Model::new("ration");
        let units = self
            .products
            .iter()
            .map(|p| model.integer(p.name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        model.maximize(units.iter().copied().zip(self.unit_profits()).collect())?;

        for (k, ingredient) in self.ingredients.iter().enumerate() {
            let used = units.iter().zip(&self.products).map(|(&x, p)| (x, p.usage[k])).collect();
            model.add_constraint(
                used,
                ConstraintOp::Le,
                ingredient.available,
                Some(&format!("stock_{}", ingredient.name)),
            )?;
        }

        Ok(model)
    }
}

/// Cheapest mix of foods meeting every nutrient minimum.
///
/// Variables: `x1..xn`, continuous quantity of each food.
/// Constraints: `nutrient_1..nutrient_m`, one `>=` row per nutrient.
#[derive(Debug, Clone, PartialEq)]
pub struct Diet {
    pub prices: Vec<f64>,
    /// `contents[k][i]`: amount of nutrient `k` in one unit of food `i`
    pub contents: Vec<Vec<f64>>,
    pub minimums: Vec<f64>,
}

impl Diet {
    pub fn model(&self) -> Result<Model, ProblemError> {
        check_len("nutrient minimums", self.contents.len(), self.minimums.len())?;
        for row in &self.contents {
            check_len("nutrient contents", self.prices.len(), row.len())?;
        }

        let mut model = Model::new("diet");
        let foods = (1..=self.prices.len())
            .map(|i| model.continuous(format!("x{i}")))
            .collect::<Result<Vec<_>, _>>()?;

        model.minimize(foods.iter().copied().zip(self.prices.iter().copied()).collect())?;

        for (k, (row, &minimum)) in self.contents.iter().zip(&self.minimums).enumerate() {
            let intake = foods.iter().copied().zip(row.iter().copied()).collect();
            model.add_constraint(intake, ConstraintOp::Ge, minimum, Some(&format!("nutrient_{}", k + 1)))?;
        }

        Ok(model)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Farm {
    pub name: String,
    pub area: f64,
    pub water: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Crop {
    pub name: String,
    /// Total area the crop may take across all farms
    pub max_area: f64,
    pub water_per_area: f64,
    pub profit_per_area: f64,
}

/// Share of each crop in the combined farm area, maximizing total profit.
///
/// Each farm contributes in proportion to its area, so a crop's profit is
/// weighted by every farm's fraction of the total.
///
/// Variables: one continuous share per crop, named after the crop.
/// Constraints: `area_<farm>` and `water_<farm>` on the farm's fraction of the
/// shares, `max_<crop>` capping `share * total_area` at the crop's maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Planting {
    pub farms: Vec<Farm>,
    pub crops: Vec<Crop>,
}

impl Planting {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let total_area: f64 = self.farms.iter().map(|f| f.area).sum();

        let mut model = Model::new("planting");
        let shares = self
            .crops
            .iter()
            .map(|crop| model.continuous(crop.name.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut profit = LinearExpr::new();
        for farm in &self.farms {
            let fraction = farm.area / total_area;
            for (&x, crop) in shares.iter().zip(&self.crops) {
                profit.add_term(x, crop.profit_per_area * fraction);
            }
        }
        model.maximize(profit)?;

        for farm in &self.farms {
            let fraction = farm.area / total_area;
            let planted = shares.iter().map(|&x| (x, fraction)).collect();
            model.add_constraint(planted, ConstraintOp::Le, farm.area, Some(&format!("area_{}", farm.name)))?;
            let water = shares
                .iter()
                .zip(&self.crops)
                .map(|(&x, c)| (x, c.water_per_area * fraction))
                .collect();
            model.add_constraint(water, ConstraintOp::Le, farm.water, Some(&format!("water_{}", farm.name)))?;
        }

        for (&x, crop) in shares.iter().zip(&self.crops) {
            model.add_constraint(
                LinearExpr::term(x, total_area),
                ConstraintOp::Le,
                crop.max_area,
                Some(&format!("max_{}", crop.name)),
            )?;
        }

        Ok(model)
    }
}

/// Area of each crop on each farm, maximizing total profit.
///
/// Variables: `<crop>_<farm>`, continuous area.
/// Constraints: `area_<farm>`, `water_<farm>`, `max_<crop>`, and with
/// `equal_share` a `share_<farm>` equality for every farm after the first,
/// forcing all farms to plant the same fraction of their area.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmPlanting {
    pub farms: Vec<Farm>,
    pub crops: Vec<Crop>,
    pub equal_share: bool,
}

impl FarmPlanting {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let mut model = Model::new("farm-planting");
        let mut area: Vec<Vec<VarId>> = Vec::with_capacity(self.farms.len());
        for farm in &self.farms {
            let row = self
                .crops
                .iter()
                .map(|crop| model.continuous(format!("{}_{}", crop.name, farm.name)))
                .collect::<Result<Vec<_>, _>>()?;
            area.push(row);
        }

        let mut profit = LinearExpr::new();
        for row in &area {
            for (&x, crop) in row.iter().zip(&self.crops) {
                profit.add_term(x, crop.profit_per_area);
            }
        }
        model.maximize(profit)?;

        for (farm, row) in self.farms.iter().zip(&area) {
            model.add_constraint(
                LinearExpr::sum(row.iter().copied()),
                ConstraintOp::Le,
                farm.area,
                Some(&format!("area_{}", farm.name)),
            )?;
            let water = row.iter().zip(&self.crops).map(|(&x, c)| (x, c.water_per_area)).collect();
            model.add_constraint(water, ConstraintOp::Le, farm.water, Some(&format!("water_{}", farm.name)))?;
        }

        for (c, crop) in self.crops.iter().enumerate() {
            model.add_constraint(
                LinearExpr::sum(area.iter().map(|row| row[c])),
                ConstraintOp::Le,
                crop.max_area,
                Some(&format!("max_{}", crop.name)),
            )?;
        }

        if self.equal_share
            && let Some((first, rest)) = self.farms.split_first()
        {
            for (f, farm) in rest.iter().enumerate() {
                let mut share = LinearExpr::new();
                for &x in &area[f + 1] {
                    share.add_term(x, 1.0 / farm.area);
                }
                for &x in &area[0] {
                    share.add_term(x, -1.0 / first.area);
                }
                model.add_constraint(share, ConstraintOp::Eq, 0.0, Some(&format!("share_{}", farm.name)))?;
            }
        }

        Ok(model)
    }
}

/// A blending component and its content of the two active agents.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintComponent {
    pub name: String,
    pub cost: f64,
    /// Fraction of drying agent
    pub sec: f64,
    /// Fraction of pigment
    pub cor: f64,
}

/// A paint with a demand to meet exactly and minimum agent shares.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintGrade {
    pub name: String,
    pub demand: f64,
    pub min_sec: f64,
    pub min_cor: f64,
}

/// Cheapest use of components to produce each paint grade.
///
/// Variables: `<component>_<grade>`, continuous liters.
/// Constraints: `demand_<grade>` equalities, `sec_<grade>` and `cor_<grade>`
/// minimum-content rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintBlend {
    pub components: Vec<PaintComponent>,
    pub grades: Vec<PaintGrade>,
}

impl PaintBlend {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let mut model = Model::new("paint");
        let mut liters: Vec<Vec<VarId>> = Vec::with_capacity(self.grades.len());
        for grade in &self.grades {
            let column = self
                .components
                .iter()
                .map(|c| model.continuous(format!("{}_{}", c.name, grade.name)))
                .collect::<Result<Vec<_>, _>>()?;
            liters.push(column);
        }

        let mut cost = LinearExpr::new();
        for column in &liters {
            for (&x, component) in column.iter().zip(&self.components) {
                cost.add_term(x, component.cost);
            }
        }
        model.minimize(cost)?;

        for (grade, column) in self.grades.iter().zip(&liters) {
            model.add_constraint(
                LinearExpr::sum(column.iter().copied()),
                ConstraintOp::Eq,
                grade.demand,
                Some(&format!("demand_{}", grade.name)),
            )?;
            let sec = column.iter().zip(&self.components).map(|(&x, c)| (x, c.sec)).collect();
            model.add_constraint(
                sec,
                ConstraintOp::Ge,
                grade.min_sec * grade.demand,
                Some(&format!("sec_{}", grade.name)),
            )?;
            let cor = column.iter().zip(&self.components).map(|(&x, c)| (x, c.cor)).collect();
            model.add_constraint(
                cor,
                ConstraintOp::Ge,
                grade.min_cor * grade.demand,
                Some(&format!("cor_{}", grade.name)),
            )?;
        }

        Ok(model)
    }
}
