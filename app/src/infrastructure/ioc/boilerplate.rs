use domain::service::{CalcJobPlugin, CalcJobPreparer, SelectCalcJobPreparer};
use service::prelude::Wannier90Calculation;

use super::Container;

impl SelectCalcJobPreparer for Container {
    fn select(&self, plugin: CalcJobPlugin) -> &(dyn CalcJobPreparer + Send + Sync) {
        match plugin {
            CalcJobPlugin::Wannier90 => Wannier90Calculation::inj_ref(self),
        }
    }
}
