// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran + rappel de l’opération en attente + indicateur mémoire
// - Pavé numérique, opérateurs, fonctions (degrés), mémoire
// - Historique : plus récent d’abord, clic = réutiliser le résultat, bouton pour vider
//
// Note :
// - La vue ne calcule rien : chaque bouton envoie UNE Commande au noyau.

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::commande::Chiffre;
use crate::noyau::{valeur_finale, ActionMemoire, Commande, Fonction, Operateur};

/// Taille des touches du pavé.
const TOUCHE: [f32; 2] = [56.0, 36.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);

                self.ui_memoire(ui);
                self.ui_fonctions(ui);
                self.ui_pave_numerique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    let m = if self.memoire_active() { "M" } else { " " };
                    ui.monospace(m);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.monospace(self.rappel_operation());
                    });
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.affichage())
                            .monospace()
                            .size(32.0),
                    );
                });
            });
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for action in [
                ActionMemoire::Effacer,
                ActionMemoire::Rappeler,
                ActionMemoire::Ajouter,
                ActionMemoire::Soustraire,
            ] {
                self.touche(ui, action.libelle(), Commande::Memoire(action));
            }
        });
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for f in Fonction::TOUTES {
                self.touche(ui, f.nom(), Commande::Fonction(f));
            }
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_accu")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "C", Commande::Effacer);
                self.touche(ui, "DEL", Commande::RetourArriere);
                self.touche(ui, "^", Commande::Operateur(Operateur::Puissance));
                self.touche(ui, "/", Commande::Operateur(Operateur::Divise));
                ui.end_row();

                self.touches_chiffres(ui, [7, 8, 9]);
                self.touche(ui, "*", Commande::Operateur(Operateur::Fois));
                ui.end_row();

                self.touches_chiffres(ui, [4, 5, 6]);
                self.touche(ui, "-", Commande::Operateur(Operateur::Moins));
                ui.end_row();

                self.touches_chiffres(ui, [1, 2, 3]);
                self.touche(ui, "+", Commande::Operateur(Operateur::Plus));
                ui.end_row();

                self.touches_chiffres(ui, [0]);
                self.touche(ui, ".", Commande::Point);
                ui.label("");
                self.touche(ui, "=", Commande::Egal);
                ui.end_row();
            });
    }

    fn touches_chiffres<const N: usize>(&mut self, ui: &mut egui::Ui, chiffres: [u8; N]) {
        for d in chiffres {
            if let Some(c) = Chiffre::new(d) {
                self.touche(ui, &d.to_string(), Commande::Chiffre(c));
            }
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut a_reutiliser: Option<String> = None;
        let mut vider = false;

        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if ui.button("Effacer l’historique").clicked() {
                    vider = true;
                }
                ui.add_space(4.0);

                if self.historique().is_empty() {
                    ui.monospace("(vide)");
                    return;
                }

                // plus récent d’abord
                for ligne in self.historique().iter().rev() {
                    let resp = ui
                        .add(
                            egui::Label::new(egui::RichText::new(ligne).monospace())
                                .sense(egui::Sense::click()),
                        )
                        .on_hover_text("Cliquer pour réutiliser le résultat");
                    if resp.clicked() {
                        a_reutiliser = Some(valeur_finale(ligne).to_string());
                    }
                }
            });

        if let Some(v) = a_reutiliser {
            self.traiter(Commande::ReutiliserHistorique(v));
        }
        if vider {
            self.traiter(Commande::EffacerHistorique);
        }
    }

    fn touche(&mut self, ui: &mut egui::Ui, label: &str, cmd: Commande) {
        let resp = ui.add_sized(TOUCHE, egui::Button::new(label));
        if resp.clicked() {
            self.traiter(cmd);
        }
    }
}
