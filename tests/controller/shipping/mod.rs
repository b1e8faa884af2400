mod authorize;
mod callback;
mod schedule_pickup;
mod track_shipment;
