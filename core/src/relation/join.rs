use paste::paste;

use crate::relation::{Joined, Records, Relation};
use crate::sql::quote_ident;
use crate::traits::{Model, Related};

macro_rules! join_impl {
    ($type:ident, $keyword:literal) => {
        paste! {
            #[doc = concat!("Appends `", $keyword, "` on the declared relationship between `M` and `O`.")]
            pub fn [<$type _join>]<O: Model>(self) -> Relation<Records<M, Joined>>
            where
                M: Related<O>,
            {
                self.join_with::<O>($keyword)
            }
        }
    };
}

impl<M: Model, J> Relation<Records<M, J>> {
    join_impl!(inner, "INNER JOIN");
    join_impl!(left, "LEFT JOIN");

    /// Same as [`inner_join`](Self::inner_join).
    pub fn join<O: Model>(self) -> Relation<Records<M, Joined>>
    where
        M: Related<O>,
    {
        self.inner_join::<O>()
    }

    fn join_with<O: Model>(mut self, keyword: &str) -> Relation<Records<M, Joined>>
    where
        M: Related<O>,
    {
        let (local, foreign) = <M as Related<O>>::JOIN;
        self.tables.push_str(&format!(
            " {keyword} {} ON {} = {}",
            quote_ident(O::TABLE),
            local.qualified(),
            foreign.qualified()
        ));
        self.reshape()
    }
}
