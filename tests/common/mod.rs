//! Shared fixture addon trees for the integration tests

use modinspect::models::Settings;
use modinspect::Inspector;
use std::fs;
use std::path::Path;

pub fn write_module(root: &Path, name: &str, manifest: &str, model_files: &[(&str, &str)]) {
    let path = root.join(name);
    fs::create_dir_all(path.join("models")).unwrap();
    fs::write(path.join("__manifest__.py"), manifest).unwrap();
    fs::write(path.join("models").join("__init__.py"), "").unwrap();
    for (file, source) in model_files {
        fs::write(path.join("models").join(file), source).unwrap();
    }
}

/// sale defines sale.order, sale_margin and sale_stock extend it, and
/// website is unrelated noise
pub fn build_addon_tree(root: &Path) {
    write_module(
        root,
        "sale",
        "{'name': 'Sales', 'version': '17.0.1.0', 'depends': ['base']}\n",
        &[(
            "sale_order.py",
            r#"
from odoo import fields, models


class SaleOrder(models.Model):
    _name = 'sale.order'

    name = fields.Char(required=True)
    partner_id = fields.Many2one('res.partner', required=True)
    note = fields.Text()

    def action_confirm(self):
        self.state = 'sale'
"#,
        )],
    );
    write_module(
        root,
        "sale_margin",
        "{'name': 'Sale Margin', 'depends': ['sale']}\n",
        &[(
            "sale_order.py",
            r#"
from odoo import fields, models


class SaleOrder(models.Model):
    _inherit = 'sale.order'

    margin = fields.Float()

    def action_confirm(self):
        self._compute_margin()
        return super().action_confirm()

    def _compute_margin(self):
        pass
"#,
        )],
    );
    write_module(
        root,
        "sale_stock",
        "{'name': 'Sale Stock', 'depends': ['sale']}\n",
        &[(
            "sale_order.py",
            r#"
from odoo import fields, models


class SaleOrder(models.Model):
    _inherit = 'sale.order'

    warehouse_id = fields.Many2one('stock.warehouse')
"#,
        )],
    );
    write_module(
        root,
        "website",
        "{'name': 'Website', 'depends': ['base']}\n",
        &[(
            "page.py",
            r#"
from odoo import fields, models


class Page(models.Model):
    _name = 'website.page'

    url = fields.Char()
"#,
        )],
    );
}

pub fn inspector_for(root: &Path) -> Inspector {
    let settings = Settings {
        addon_paths: vec![root.to_path_buf()],
        ..Settings::default()
    };
    Inspector::new(settings).unwrap()
}
