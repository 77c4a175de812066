//! The orange record stored by the inventory cache.
//!
//! An [`Orange`] is validated once, when it is built, and read-only afterwards
//! apart from filling in the food companies it is sold to.

use std::convert::TryFrom;
use std::fmt;

use crate::error::{OrangeError, OrangeResult};
use crate::record::Record;

/// The largest size an orange can have. Oranges of size `s` live in cache
/// cell `s - 1`, so this matches [`ORANGE_CACHE_SIZE`](crate::ORANGE_CACHE_SIZE).
pub const ORANGE_MAX_SIZE: u16 = 256;

/// The smallest size an orange can have.
pub const ORANGE_MIN_SIZE: u16 = 1;

/// The month the inventory treats as "now".
pub const CURRENT_MONTH: Month = Month::Nov;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Month {
    Jan = 1,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Month {
    type Error = OrangeError;

    fn try_from(value: u8) -> OrangeResult<Self> {
        match value {
            1..=12 => Ok(Month::ALL[usize::from(value) - 1]),
            _ => Err(OrangeError::InvalidMonth(value)),
        }
    }
}

/// An orange waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orange {
    size: u16,
    expiration_month: Month,
    max_food_companies: usize,
    food_companies: Vec<String>,
    selling_price: u32,
}

impl Orange {
    /// Builds an orange with no food companies yet.
    ///
    /// # Errors
    ///
    /// Fails if `size` is outside `ORANGE_MIN_SIZE..=ORANGE_MAX_SIZE`, if
    /// `max_food_companies` or `selling_price` is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use orange_cache::{Month, Orange, OrangeError};
    ///
    /// let orange = Orange::new(12, Month::Dec, 2, 40).unwrap();
    /// assert_eq!(orange.size(), 12);
    ///
    /// assert_eq!(Orange::new(0, Month::Dec, 2, 40), Err(OrangeError::InvalidSize(0)));
    /// ```
    pub fn new(
        size: u16,
        expiration_month: Month,
        max_food_companies: i32,
        selling_price: i32,
    ) -> OrangeResult<Self> {
        if !(ORANGE_MIN_SIZE..=ORANGE_MAX_SIZE).contains(&size) {
            return Err(OrangeError::InvalidSize(size));
        }
        let selling_price =
            u32::try_from(selling_price).map_err(|_| OrangeError::InvalidPrice(selling_price))?;
        if selling_price == 0 {
            return Err(OrangeError::InvalidPrice(0));
        }
        let max_food_companies = match usize::try_from(max_food_companies) {
            Ok(max) if max > 0 => max,
            _ => return Err(OrangeError::InvalidCompanyCapacity(max_food_companies)),
        };
        Ok(Self {
            size,
            expiration_month,
            max_food_companies,
            food_companies: Vec::new(),
            selling_price,
        })
    }

    /// Adds `company` to the companies this orange is delivered to.
    ///
    /// # Errors
    ///
    /// [`OrangeError::EmptyCompanyName`] for an empty name and
    /// [`OrangeError::CompanyListFull`] once every slot is taken.
    pub fn with_food_company(mut self, company: impl Into<String>) -> OrangeResult<Self> {
        let company = company.into();
        if company.is_empty() {
            return Err(OrangeError::EmptyCompanyName);
        }
        if self.food_companies.len() == self.max_food_companies {
            return Err(OrangeError::CompanyListFull {
                capacity: self.max_food_companies,
            });
        }
        self.food_companies.push(company);
        Ok(self)
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn expiration_month(&self) -> Month {
        self.expiration_month
    }

    pub fn selling_price(&self) -> u32 {
        self.selling_price
    }

    pub fn max_food_companies(&self) -> usize {
        self.max_food_companies
    }

    pub fn food_companies(&self) -> &[String] {
        &self.food_companies
    }

    /// Whether the orange expires before `month`.
    pub fn is_expired_in(&self, month: Month) -> bool {
        self.expiration_month < month
    }
}

impl Record for Orange {
    fn bucket(&self) -> usize {
        usize::from(self.size) - usize::from(ORANGE_MIN_SIZE)
    }

    fn weight(&self) -> u32 {
        u32::from(self.size)
    }

    fn is_delivered_to(&self, company: &str) -> bool {
        self.food_companies.iter().any(|c| c == company)
    }
}

impl fmt::Display for Orange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "orange(size {}, expires {:?}, {} for [{}])",
            self.size,
            self.expiration_month,
            self.selling_price,
            self.food_companies.join(", ")
        )
    }
}
